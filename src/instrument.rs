//! Cutting tool power output.

use embedded_hal::pwm::SetDutyCycle;

use crate::config::units::Millimeters;
use crate::error::{HardwareError, Result};
use crate::router::Outcome;

/// The cutting tool: a power output and an informational cutter radius.
pub struct Instrument<PWM>
where
    PWM: SetDutyCycle,
{
    output: Option<PWM>,
    radius: Millimeters,
    level: u8,
}

impl<PWM> Instrument<PWM>
where
    PWM: SetDutyCycle,
{
    /// Create an instrument. A negative radius is clamped to zero; `None`
    /// for `output` means the tool is switched by hand.
    pub fn new(output: Option<PWM>, radius: Millimeters) -> Self {
        Self {
            output,
            radius: Millimeters(radius.0.max(0.0)),
            level: 0,
        }
    }

    /// Cutter radius.
    #[inline]
    pub fn radius(&self) -> Millimeters {
        self.radius
    }

    /// Last power level written.
    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Whether a power output is wired.
    #[inline]
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// Drive the power output at `level` out of 255.
    pub fn set_power(&mut self, level: u8) -> Result<Outcome> {
        let Some(output) = self.output.as_mut() else {
            return Ok(Outcome::IgnoredDegenerate);
        };

        output
            .set_duty_cycle_fraction(u16::from(level), u16::from(u8::MAX))
            .map_err(|_| HardwareError::PowerOutput)?;
        self.level = level;
        debug!("instrument power {}", level);
        Ok(Outcome::Accepted)
    }
}
