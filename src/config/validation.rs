//! Configuration validation.

use crate::axis::AxisId;
use crate::error::{ConfigError, Error, Result};

use super::{MachineConfig, MotionSettings};

/// Validate a machine configuration.
///
/// Checks:
/// - Both horizontal axes are present
/// - Every present axis has usable geometry
/// - Tick length and step acceleration are positive
/// - Feed rate and start speed are not negative
///
/// A configuration file is held to a stricter standard than
/// [`Router::configure_axis`](crate::Router::configure_axis), which disables a
/// bad axis instead of failing.
pub fn validate_config(config: &MachineConfig) -> Result<()> {
    for required in AxisId::ALL.into_iter().filter(|id| id.is_horizontal()) {
        if config.axis(required).is_none() {
            return Err(Error::Config(ConfigError::MissingAxis(required)));
        }
    }

    for (id, geometry) in config.configured_axes() {
        if !geometry.is_valid(config.motion.epsilon) {
            return Err(Error::Config(ConfigError::InvalidAxisGeometry(id)));
        }
    }

    validate_motion(&config.motion)
}

/// Check motion settings before they reach the engine.
///
/// Runs for configuration files and for [`Router::new`](crate::Router::new).
/// Non-finite values are rejected everywhere.
pub fn validate_motion(settings: &MotionSettings) -> Result<()> {
    if !positive(settings.tick.0) {
        return Err(Error::Config(ConfigError::InvalidTickLength(settings.tick.0)));
    }

    if !positive(settings.step_acceleration.0) {
        return Err(Error::Config(ConfigError::InvalidStepAcceleration(
            settings.step_acceleration.0,
        )));
    }

    for speed in [settings.feed_rate.0, settings.max_start_speed.0] {
        if !non_negative(speed) {
            return Err(Error::Config(ConfigError::InvalidSpeed(speed)));
        }
    }

    if !non_negative(settings.epsilon) {
        return Err(Error::Config(ConfigError::InvalidEpsilon(settings.epsilon)));
    }

    Ok(())
}

#[inline]
fn positive(value: f32) -> bool {
    value > 0.0 && value.is_finite()
}

#[inline]
pub(crate) fn non_negative(value: f32) -> bool {
    value >= 0.0 && value.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Microseconds, Millimeters, MillimetersPerSec};
    use crate::config::AxisGeometry;

    fn valid_config() -> MachineConfig {
        let mut config = MachineConfig::default();
        config.axes.x = Some(AxisGeometry::new(200, Millimeters(1.0), Millimeters(300.0)));
        config.axes.y = Some(AxisGeometry::new(200, Millimeters(1.0), Millimeters(300.0)));
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_y_axis() {
        let mut config = valid_config();
        config.axes.y = None;
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::MissingAxis(AxisId::Y)))
        ));
    }

    #[test]
    fn test_invalid_z_geometry() {
        let mut config = valid_config();
        config.axes.z = Some(AxisGeometry::new(200, Millimeters(0.0), Millimeters(80.0)));
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidAxisGeometry(AxisId::Z)))
        ));
    }

    #[test]
    fn test_invalid_tick() {
        let mut config = valid_config();
        config.motion.tick = Microseconds(0.0);
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidTickLength(_)))
        ));
    }

    #[test]
    fn test_negative_start_speed() {
        let mut config = valid_config();
        config.motion.max_start_speed = MillimetersPerSec(-1.0);
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidSpeed(_)))
        ));
    }

    #[test]
    fn test_non_finite_settings_rejected() {
        let nan_tick = MotionSettings::default().with_tick(Microseconds(f32::NAN));
        assert!(matches!(
            validate_motion(&nan_tick),
            Err(Error::Config(ConfigError::InvalidTickLength(_)))
        ));

        let zero_accel = MotionSettings::default().with_step_acceleration(MillimetersPerSec(0.0));
        assert!(matches!(
            validate_motion(&zero_accel),
            Err(Error::Config(ConfigError::InvalidStepAcceleration(_)))
        ));

        let nan_feed = MotionSettings::default().with_feed_rate(MillimetersPerSec(f32::NAN));
        assert!(matches!(
            validate_motion(&nan_feed),
            Err(Error::Config(ConfigError::InvalidSpeed(_)))
        ));

        let mut negative_eps = MotionSettings::default();
        negative_eps.epsilon = -1.0;
        assert!(matches!(
            validate_motion(&negative_eps),
            Err(Error::Config(ConfigError::InvalidEpsilon(_)))
        ));
    }
}
