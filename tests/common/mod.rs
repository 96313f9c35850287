//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use cnc_motion::{AxisGeometry, AxisId, AxisPins, Millimeters, MotionSettings, Router, Status};

#[derive(Default)]
struct Line {
    high: Cell<bool>,
    rising_edges: Cell<u32>,
    duty: Cell<u16>,
}

/// A pin that records what was written to it.
///
/// Clones share state, so a test can keep one handle while the router owns
/// the other. Reads return the last level set through [`RecordingPin::drive`].
#[derive(Clone, Default)]
pub struct RecordingPin(Rc<Line>);

impl RecordingPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rising edges seen so far (step pulses on a step line).
    pub fn rising_edges(&self) -> u32 {
        self.0.rising_edges.get()
    }

    /// Current level.
    pub fn is_set(&self) -> bool {
        self.0.high.get()
    }

    /// Force the level seen by reads (limit sensors).
    pub fn drive(&self, high: bool) {
        self.0.high.set(high);
    }

    /// Last duty cycle written.
    pub fn duty(&self) -> u16 {
        self.0.duty.get()
    }
}

impl embedded_hal::digital::ErrorType for RecordingPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.0.high.get() {
            self.0.rising_edges.set(self.0.rising_edges.get() + 1);
        }
        self.0.high.set(true);
        Ok(())
    }
}

impl embedded_hal::digital::InputPin for RecordingPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.high.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.high.get())
    }
}

impl embedded_hal::pwm::ErrorType for RecordingPin {
    type Error = Infallible;
}

impl embedded_hal::pwm::SetDutyCycle for RecordingPin {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.0.duty.set(duty);
        Ok(())
    }
}

pub type TestRouter = Router<RecordingPin, RecordingPin, RecordingPin, RecordingPin, RecordingPin>;

/// Handles to every line of one axis.
#[derive(Clone, Default)]
pub struct AxisLines {
    pub step: RecordingPin,
    pub dir: RecordingPin,
    pub enable: RecordingPin,
    pub left: RecordingPin,
    pub right: RecordingPin,
}

impl AxisLines {
    pub fn pins(&self) -> AxisPins<RecordingPin, RecordingPin, RecordingPin, RecordingPin> {
        AxisPins::new()
            .step_pin(self.step.clone())
            .dir_pin(self.dir.clone())
            .enable_pin(self.enable.clone())
            .left_limit(self.left.clone())
            .right_limit(self.right.clone())
    }
}

/// 1.8° stepper, 1 mm per step, 300 mm of travel.
pub fn one_mm_axis() -> AxisGeometry {
    AxisGeometry::new(200, Millimeters(1.0), Millimeters(300.0))
}

/// Router with X and Y configured on `one_mm_axis`, returning the line handles.
pub fn xy_router(settings: MotionSettings) -> (TestRouter, AxisLines, AxisLines) {
    let mut router = TestRouter::new(settings).unwrap();
    let x = AxisLines::default();
    let y = AxisLines::default();
    router.configure_axis(AxisId::X, &one_mm_axis(), x.pins());
    router.configure_axis(AxisId::Y, &one_mm_axis(), y.pins());
    (router, x, y)
}

/// Tick until the router leaves `Processing`, returning the tick count.
pub fn run_to_completion(router: &mut TestRouter, max_ticks: u32) -> u32 {
    let mut ticks = 0;
    while router.status() == Status::Processing {
        assert!(ticks < max_ticks, "move did not finish in {} ticks", max_ticks);
        router.tick().unwrap();
        ticks += 1;
    }
    ticks
}
