//! Unit tests for configuration validation.

use cnc_motion::config::{parse_config, validate_config, MachineConfig};
use cnc_motion::error::{ConfigError, Error};
use cnc_motion::AxisId;

const AXES: &str = r#"
[axes.x]
steps_per_revolution = 200
mm_per_step = 1.0
travel_mm = 300.0

[axes.y]
steps_per_revolution = 200
mm_per_step = 1.0
travel_mm = 300.0
"#;

fn with_motion(motion: &str) -> String {
    format!("[motion]\n{motion}\n{AXES}")
}

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config: MachineConfig = toml::from_str(AXES).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails without the Y axis.
#[test]
fn test_missing_horizontal_axis() {
    let toml_str = r#"
[axes.x]
steps_per_revolution = 200
mm_per_step = 1.0
travel_mm = 300.0
"#;

    let result = parse_config(toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingAxis(AxisId::Y)))
    ));
}

/// Test validation fails for a vertical axis with no travel.
#[test]
fn test_invalid_vertical_geometry() {
    let toml_str = format!(
        "{AXES}\n[axes.z]\nsteps_per_revolution = 200\nmm_per_step = 0.1\ntravel_mm = 0.0\n"
    );

    let result = parse_config(&toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidAxisGeometry(AxisId::Z)))
    ));
}

/// Test validation fails for a zero tick.
#[test]
fn test_zero_tick_rejected() {
    let result = parse_config(&with_motion("tick_us = 0.0"));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidTickLength(_)))
    ));
}

/// Test validation fails for a non-positive acceleration increment.
#[test]
fn test_step_acceleration_must_be_positive() {
    let result = parse_config(&with_motion("step_accel_mm_per_sec = -0.1"));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidStepAcceleration(_)))
    ));
}

/// Test validation fails for a negative start speed.
#[test]
fn test_negative_start_speed_rejected() {
    let result = parse_config(&with_motion("max_start_speed_mm_per_sec = -5.0"));
    assert!(matches!(result, Err(Error::Config(ConfigError::InvalidSpeed(_)))));
}

/// Test that errors render for humans.
#[test]
fn test_error_display() {
    let err = parse_config(&with_motion("tick_us = -1.0")).unwrap_err();
    assert!(err.to_string().contains("tick"));
}
