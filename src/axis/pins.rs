//! Builder for the hardware lines of one axis.

use embedded_hal::digital::{InputPin, OutputPin};

/// Hardware lines handed to [`Router::configure_axis`](crate::Router::configure_axis).
///
/// Step and direction outputs are required for the axis to be enabled; the
/// enable output and both limit sensors are optional.
///
/// # Example
///
/// ```rust,ignore
/// let pins = AxisPins::new()
///     .step_pin(x_step)
///     .dir_pin(x_dir)
///     .enable_pin(x_en)
///     .left_limit(x_home);
/// ```
pub struct AxisPins<STEP, DIR, EN, LIM>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIM: InputPin,
{
    pub(crate) step: Option<STEP>,
    pub(crate) dir: Option<DIR>,
    pub(crate) enable: Option<EN>,
    pub(crate) left_limit: Option<LIM>,
    pub(crate) right_limit: Option<LIM>,
}

impl<STEP, DIR, EN, LIM> Default for AxisPins<STEP, DIR, EN, LIM>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIM: InputPin,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, EN, LIM> AxisPins<STEP, DIR, EN, LIM>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIM: InputPin,
{
    /// Create an empty pin set.
    pub fn new() -> Self {
        Self {
            step: None,
            dir: None,
            enable: None,
            left_limit: None,
            right_limit: None,
        }
    }

    /// Set the STEP output.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step = Some(pin);
        self
    }

    /// Set the DIR output.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir = Some(pin);
        self
    }

    /// Set the driver ENABLE output.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable = Some(pin);
        self
    }

    /// Set the sensor at the negative end of travel (active high).
    pub fn left_limit(mut self, pin: LIM) -> Self {
        self.left_limit = Some(pin);
        self
    }

    /// Set the sensor at the positive end of travel (active high).
    pub fn right_limit(mut self, pin: LIM) -> Self {
        self.right_limit = Some(pin);
        self
    }

    /// Whether the axis can be driven at all.
    pub fn has_motion_lines(&self) -> bool {
        self.step.is_some() && self.dir.is_some()
    }
}
