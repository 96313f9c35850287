//! Per-axis pulse driver.
//!
//! Owns the hardware lines of one configured axis together with its live
//! counters, and turns scheduler decisions into pin writes.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::AxisScale;
use crate::error::{Error, HardwareError, Line, Result};

use super::id::AxisId;
use super::pins::AxisPins;
use super::runtime::{AxisRuntime, Direction};

/// A configured, enabled axis.
pub struct Axis<STEP, DIR, EN, LIM>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIM: InputPin,
{
    id: AxisId,
    scale: AxisScale,
    step_pin: STEP,
    dir_pin: DIR,
    enable_pin: Option<EN>,
    left_limit: Option<LIM>,
    right_limit: Option<LIM>,
    /// Counters the scheduler steps.
    pub(crate) live: AxisRuntime,
    /// Whether the enable line is currently asserted.
    energized: bool,
}

impl<STEP, DIR, EN, LIM> Axis<STEP, DIR, EN, LIM>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIM: InputPin,
{
    /// Build an axis from its pins. Returns `None` if step or direction
    /// output is missing.
    pub(crate) fn from_pins(id: AxisId, scale: AxisScale, pins: AxisPins<STEP, DIR, EN, LIM>) -> Option<Self> {
        let AxisPins {
            step,
            dir,
            enable,
            left_limit,
            right_limit,
        } = pins;

        Some(Self {
            id,
            scale,
            step_pin: step?,
            dir_pin: dir?,
            enable_pin: enable,
            left_limit,
            right_limit,
            live: AxisRuntime::at_rest(0.0),
            energized: false,
        })
    }

    /// Axis identifier.
    #[inline]
    pub fn id(&self) -> AxisId {
        self.id
    }

    /// Step scale of this axis.
    #[inline]
    pub fn scale(&self) -> &AxisScale {
        &self.scale
    }

    /// Live counters.
    #[inline]
    pub fn runtime(&self) -> &AxisRuntime {
        &self.live
    }

    /// Whether the enable line is asserted.
    #[inline]
    pub fn is_energized(&self) -> bool {
        self.energized
    }

    /// Position actually reached so far.
    #[inline]
    pub fn reached_position(&self) -> f32 {
        self.live.reached_position(self.scale.steps_per_mm)
    }

    /// Load a committed move: write the direction line and energize the
    /// driver if the axis has steps to take.
    pub(crate) fn load(&mut self, runtime: AxisRuntime) -> Result<()> {
        self.live = runtime;
        if self.live.is_moving() {
            self.write_direction(self.live.direction)?;
            self.energize()?;
        }
        Ok(())
    }

    /// Emit every step that is due after `elapsed_us` more microseconds,
    /// calling `on_step` with the remaining count after each one.
    pub(crate) fn advance<F>(&mut self, elapsed_us: f32, mut on_step: F) -> Result<u32>
    where
        F: FnMut(u32),
    {
        if !self.live.is_moving() {
            return Ok(0);
        }

        self.live.accumulate(elapsed_us);

        let mut emitted = 0;
        while self.live.step_due() {
            self.pulse()?;
            self.live.consume_step();
            emitted += 1;
            on_step(self.live.steps_left);
        }

        if !self.live.is_moving() {
            self.release()?;
        }

        Ok(emitted)
    }

    /// Read the limit sensor on the side the axis is travelling toward.
    pub(crate) fn limit_hit(&mut self) -> Result<bool> {
        if !self.live.is_moving() {
            return Ok(false);
        }

        let id = self.id;
        let sensor = match self.live.direction {
            Direction::Negative => self.left_limit.as_mut(),
            Direction::Positive => self.right_limit.as_mut(),
        };

        match sensor {
            Some(pin) => pin
                .is_high()
                .map_err(|_| Error::from(HardwareError::Pin { axis: id, line: Line::Limit })),
            None => Ok(false),
        }
    }

    /// Stop where the axis stands: remaining steps are dropped and the
    /// position is rolled back to what was actually reached.
    pub(crate) fn halt(&mut self) -> Result<f32> {
        let reached = self.reached_position();
        self.live.position = reached;
        self.live.halt();
        self.release()?;
        Ok(reached)
    }

    /// Overwrite the position of an axis at rest.
    pub(crate) fn set_position(&mut self, position: f32) {
        self.live.position = position;
    }

    fn pulse(&mut self) -> Result<()> {
        self.step_pin.set_high().map_err(|_| self.pin_error(Line::Step))?;
        self.live.pulse_high = true;
        self.step_pin.set_low().map_err(|_| self.pin_error(Line::Step))?;
        self.live.pulse_high = false;
        Ok(())
    }

    fn write_direction(&mut self, direction: Direction) -> Result<()> {
        // High means toward-negative unless inverted.
        let high = direction.is_negative() != self.scale.invert_direction;
        let result = if high {
            self.dir_pin.set_high()
        } else {
            self.dir_pin.set_low()
        };
        result.map_err(|_| self.pin_error(Line::Direction))?;
        Ok(())
    }

    fn energize(&mut self) -> Result<()> {
        if let Some(pin) = self.enable_pin.as_mut() {
            pin.set_high()
                .map_err(|_| HardwareError::Pin { axis: self.id, line: Line::Enable })?;
        }
        self.energized = true;
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        if !self.energized {
            return Ok(());
        }
        if let Some(pin) = self.enable_pin.as_mut() {
            pin.set_low()
                .map_err(|_| HardwareError::Pin { axis: self.id, line: Line::Enable })?;
        }
        self.energized = false;
        Ok(())
    }

    fn pin_error(&self, line: Line) -> Error {
        HardwareError::Pin { axis: self.id, line }.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AxisGeometry, Millimeters};
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    type MockAxis = Axis<PinMock, PinMock, PinMock, PinMock>;

    fn scale() -> AxisScale {
        AxisScale::from_geometry(&AxisGeometry::new(200, Millimeters(1.0), Millimeters(300.0)))
    }

    fn two_steps_back() -> AxisRuntime {
        AxisRuntime {
            position: -2.0,
            steps_left: 2,
            step_interval_us: 100.0,
            direction: Direction::Negative,
            ..AxisRuntime::default()
        }
    }

    #[test]
    fn test_axis_requires_direction_line() {
        let mut step = PinMock::new(&[]);
        let pins = AxisPins::<PinMock, PinMock, PinMock, PinMock>::new().step_pin(step.clone());

        assert!(MockAxis::from_pins(AxisId::X, scale(), pins).is_none());
        step.done();
    }

    #[test]
    fn test_load_and_step_to_completion() {
        let mut step = PinMock::new(&[
            Transaction::set(State::High),
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
        ]);
        let mut dir = PinMock::new(&[Transaction::set(State::High)]);
        let mut enable = PinMock::new(&[Transaction::set(State::High), Transaction::set(State::Low)]);

        let pins = AxisPins::new()
            .step_pin(step.clone())
            .dir_pin(dir.clone())
            .enable_pin(enable.clone());
        let mut axis = MockAxis::from_pins(AxisId::X, scale(), pins).unwrap();

        axis.load(two_steps_back()).unwrap();
        assert!(axis.is_energized());

        let mut seen = heapless::Vec::<u32, 4>::new();
        assert_eq!(axis.advance(150.0, |left| seen.push(left).unwrap()).unwrap(), 1);
        assert_eq!(axis.advance(50.0, |left| seen.push(left).unwrap()).unwrap(), 1);
        assert_eq!(seen.as_slice(), &[1, 0]);
        assert!(!axis.is_energized());

        // Nothing left: no further pin traffic
        assert_eq!(axis.advance(500.0, |_| {}).unwrap(), 0);
        assert!((axis.reached_position() + 2.0).abs() < 1e-4);

        step.done();
        dir.done();
        enable.done();
    }

    #[test]
    fn test_limit_on_travel_side_only() {
        let mut step = PinMock::new(&[]);
        let mut dir = PinMock::new(&[Transaction::set(State::High)]);
        let mut left = PinMock::new(&[Transaction::get(State::High)]);
        let mut right = PinMock::new(&[]);

        let pins = AxisPins::<PinMock, PinMock, PinMock, PinMock>::new()
            .step_pin(step.clone())
            .dir_pin(dir.clone())
            .left_limit(left.clone())
            .right_limit(right.clone());
        let mut axis = MockAxis::from_pins(AxisId::Y, scale(), pins).unwrap();

        axis.load(two_steps_back()).unwrap();
        assert!(axis.limit_hit().unwrap());

        // Halting with both steps pending rolls the position back to the start
        let reached = axis.halt().unwrap();
        assert!(reached.abs() < 1e-4);
        assert!(!axis.runtime().is_moving());

        step.done();
        dir.done();
        left.done();
        right.done();
    }
}
