//! The motion controller.
//!
//! [`Router`] owns the axes and the cutting tool and exposes the whole
//! control surface: configure, prepare, commit, tick.
//!
//! # Control flow
//!
//! ```rust,ignore
//! let mut router = Router::new(MotionSettings::default())?;
//! router.configure_axis(AxisId::X, &x_geometry, x_pins);
//! router.configure_axis(AxisId::Y, &y_geometry, y_pins);
//! router.set_speed(MillimetersPerSec(500.0));
//! router.set_max_start_speed(MillimetersPerSec(50.0));
//!
//! loop {
//!     // every 50 µs from a timer
//!     router.tick()?;
//!
//!     // between ticks
//!     if !router.is_prepared() {
//!         if let Some(request) = queue.peek_request() {
//!             router.prepare(&request);
//!         }
//!     }
//!     if router.status() == Status::Idle {
//!         router.commit()?;
//!     }
//! }
//! ```
//!
//! Every mutating method takes `&mut self`, so a commit can never interleave
//! with a tick. When `tick` runs from an interrupt, share the router through
//! a critical-section mutex so the prepare/commit side holds it for the
//! duration of the call.

mod pipeline;
mod scheduler;
mod status;

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

use crate::axis::{Axis, AxisId, AxisPins};
use crate::config::units::{Millimeters, MillimetersPerSec};
use crate::config::validation::non_negative;
use crate::config::{validate_motion, AxisGeometry, AxisScale, MotionSettings};
use crate::error::Result;
use crate::instrument::Instrument;
use crate::motion::{JunctionContext, MotionPhase, MotionProfile, Point3, SpeedRamp};

pub use status::{Outcome, Status};

/// Multi-axis stepper controller.
///
/// Generic over:
/// - `STEP`: step pulse output (must implement `OutputPin`)
/// - `DIR`: direction output (must implement `OutputPin`)
/// - `EN`: driver enable output (must implement `OutputPin`)
/// - `LIM`: limit sensor input (must implement `InputPin`)
/// - `PWM`: instrument power output (must implement `SetDutyCycle`)
pub struct Router<STEP, DIR, EN, LIM, PWM>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIM: InputPin,
    PWM: SetDutyCycle,
{
    /// Enabled axes; `None` when unconfigured or rejected.
    axes: [Option<Axis<STEP, DIR, EN, LIM>>; 3],
    instrument: Option<Instrument<PWM>>,
    settings: MotionSettings,
    status: Status,
    /// End position of the last prepared segment.
    planned: [f32; 3],
    /// Single-slot lookahead buffer.
    prepared: Option<MotionProfile>,
    junction: JunctionContext,
    /// Envelope of the live move.
    ramp: SpeedRamp,
    pacing_axis: AxisId,
    ticks_since_commit: u32,
}

impl<STEP, DIR, EN, LIM, PWM> Router<STEP, DIR, EN, LIM, PWM>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIM: InputPin,
    PWM: SetDutyCycle,
{
    /// Create an unconfigured router.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `settings` fails
    /// [`validate_motion`]: a tick or step acceleration that is not positive,
    /// a negative speed, or any non-finite value.
    pub fn new(settings: MotionSettings) -> Result<Self> {
        validate_motion(&settings)?;

        Ok(Self {
            axes: [None, None, None],
            instrument: None,
            settings,
            status: Status::Uninitialized,
            planned: [0.0; 3],
            prepared: None,
            junction: JunctionContext::default(),
            ramp: SpeedRamp::constant(),
            pacing_axis: AxisId::X,
            ticks_since_commit: 0,
        })
    }

    /// Crate version string.
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Configure one axis.
    ///
    /// Invalid geometry or missing step/direction lines leave the axis
    /// disabled and return [`Outcome::IgnoredDegenerate`]. Configuring both
    /// X and Y moves the router from `Uninitialized` to `Idle`. The axis
    /// position resets to zero.
    pub fn configure_axis(
        &mut self,
        id: AxisId,
        geometry: &AxisGeometry,
        pins: AxisPins<STEP, DIR, EN, LIM>,
    ) -> Outcome {
        if self.status == Status::Processing || self.prepared.is_some() {
            warn!("axis {} not reconfigured: move pending", id);
            return Outcome::IgnoredBusy;
        }

        let i = id.index();
        self.axes[i] = if geometry.is_valid(self.settings.epsilon) {
            Axis::from_pins(id, AxisScale::from_geometry(geometry), pins)
        } else {
            None
        };
        self.planned[i] = 0.0;
        self.refresh_readiness();

        if self.axes[i].is_some() {
            info!("axis {} enabled", id);
            Outcome::Accepted
        } else {
            warn!("axis {} disabled: unusable geometry or lines", id);
            Outcome::IgnoredDegenerate
        }
    }

    /// Attach the cutting tool.
    pub fn set_instrument(&mut self, output: Option<PWM>, radius: Millimeters) -> Outcome {
        if self.status == Status::Processing {
            return Outcome::IgnoredBusy;
        }
        self.instrument = Some(Instrument::new(output, radius));
        Outcome::Accepted
    }

    /// Set the tool power level (0-255).
    pub fn set_instrument_power(&mut self, level: u8) -> Result<Outcome> {
        match self.instrument.as_mut() {
            Some(instrument) => instrument.set_power(level),
            None => Ok(Outcome::IgnoredDegenerate),
        }
    }

    /// Declare the machine to be at `position`.
    ///
    /// Ignored while a move is running or prepared. Z is only set when the
    /// vertical axis is enabled.
    pub fn set_current_position(&mut self, position: Point3) -> Outcome {
        if self.status == Status::Processing || self.prepared.is_some() {
            return Outcome::IgnoredBusy;
        }

        let coords = position.to_array();
        for axis in self.axes.iter_mut().flatten() {
            let i = axis.id().index();
            axis.set_position(coords[i]);
            self.planned[i] = coords[i];
        }
        Outcome::Accepted
    }

    /// Set the feed rate used by [`line_to`](Self::line_to).
    ///
    /// Negative or non-finite rates are ignored.
    pub fn set_speed(&mut self, feed_rate: MillimetersPerSec) -> Outcome {
        if !non_negative(feed_rate.0) {
            return Outcome::IgnoredDegenerate;
        }
        self.settings.feed_rate = feed_rate;
        Outcome::Accepted
    }

    /// Set the speed moves start from; feeds above it are accelerated.
    ///
    /// Negative or non-finite speeds are ignored.
    pub fn set_max_start_speed(&mut self, speed: MillimetersPerSec) -> Outcome {
        if !non_negative(speed.0) {
            return Outcome::IgnoredDegenerate;
        }
        self.settings.max_start_speed = speed;
        Outcome::Accepted
    }

    /// Controller mode.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether a segment is waiting to be committed.
    #[inline]
    pub fn is_prepared(&self) -> bool {
        self.prepared.is_some()
    }

    /// The segment waiting to be committed.
    #[inline]
    pub fn prepared_profile(&self) -> Option<&MotionProfile> {
        self.prepared.as_ref()
    }

    /// Motion settings in effect.
    #[inline]
    pub fn settings(&self) -> &MotionSettings {
        &self.settings
    }

    /// A configured axis.
    #[inline]
    pub fn axis(&self, id: AxisId) -> Option<&Axis<STEP, DIR, EN, LIM>> {
        self.axes[id.index()].as_ref()
    }

    /// Whether an axis takes part in motion.
    #[inline]
    pub fn is_axis_enabled(&self, id: AxisId) -> bool {
        self.axes[id.index()].is_some()
    }

    /// The cutting tool, if attached.
    #[inline]
    pub fn instrument(&self) -> Option<&Instrument<PWM>> {
        self.instrument.as_ref()
    }

    /// Steps the live move still has to emit on an axis.
    pub fn steps_left(&self, id: AxisId) -> u32 {
        self.axis(id).map_or(0, |axis| axis.runtime().steps_left)
    }

    /// Position actually reached, counting only emitted steps.
    pub fn position(&self) -> Point3 {
        self.per_axis(|axis| axis.reached_position())
    }

    /// End position of the live move.
    pub fn target_position(&self) -> Point3 {
        self.per_axis(|axis| axis.runtime().position)
    }

    /// Current fraction of the commanded feed.
    #[inline]
    pub fn speed_multiplier(&self) -> f32 {
        self.ramp.multiplier
    }

    /// Whether the live move uses the acceleration envelope.
    #[inline]
    pub fn is_accelerated(&self) -> bool {
        self.ramp.accelerated
    }

    /// Axis pacing the live move's envelope.
    #[inline]
    pub fn pacing_axis(&self) -> AxisId {
        self.pacing_axis
    }

    /// Deceleration onset of the live move, in pacing steps left.
    #[inline]
    pub fn deceleration_steps(&self) -> u32 {
        self.ramp.deceleration_steps
    }

    /// Envelope phase of the live move.
    pub fn phase(&self) -> MotionPhase {
        if self.status != Status::Processing {
            return MotionPhase::Complete;
        }
        self.ramp.phase(self.steps_left(self.pacing_axis))
    }

    /// Corner continuity carried into the next prepare.
    #[inline]
    pub fn junction(&self) -> &JunctionContext {
        &self.junction
    }

    /// Ticks processed since the last commit.
    #[inline]
    pub fn ticks_since_commit(&self) -> u32 {
        self.ticks_since_commit
    }

    fn per_axis<F>(&self, f: F) -> Point3
    where
        F: Fn(&Axis<STEP, DIR, EN, LIM>) -> f32,
    {
        let mut coords = [0.0; 3];
        for axis in self.axes.iter().flatten() {
            coords[axis.id().index()] = f(axis);
        }
        Point3::from_array(coords)
    }

    fn scales(&self) -> [Option<AxisScale>; 3] {
        let mut scales = [None; 3];
        for axis in self.axes.iter().flatten() {
            scales[axis.id().index()] = Some(*axis.scale());
        }
        scales
    }

    fn horizontal_ready(&self) -> bool {
        AxisId::ALL
            .into_iter()
            .filter(|id| id.is_horizontal())
            .all(|id| self.is_axis_enabled(id))
    }

    fn refresh_readiness(&mut self) {
        if matches!(self.status, Status::Uninitialized | Status::Idle) {
            self.status = if self.horizontal_ready() {
                Status::Idle
            } else {
                Status::Uninitialized
            };
        }
    }
}
