//! Unit tests for TOML configuration parsing.

use cnc_motion::config::{parse_config, MachineConfig, DEFAULT_EPSILON};
use cnc_motion::AxisId;

const FULL_CONFIG: &str = r#"
[motion]
feed_rate_mm_per_sec = 500.0
max_start_speed_mm_per_sec = 50.0
tick_us = 25.0
step_accel_mm_per_sec = 0.5

[axes.x]
steps_per_revolution = 200
mm_per_step = 1.0
travel_mm = 300.0

[axes.y]
steps_per_revolution = 200
mm_per_step = 1.0
travel_mm = 300.0
invert_direction = true

[axes.z]
steps_per_revolution = 400
mm_per_step = 0.125
travel_mm = 80.0

[instrument]
radius_mm = 1.5
"#;

/// Test parsing a configuration with every table present.
#[test]
fn test_parse_full_config() {
    let config = parse_config(FULL_CONFIG).expect("Failed to parse config");

    assert_eq!(config.motion.feed_rate.0, 500.0);
    assert_eq!(config.motion.max_start_speed.0, 50.0);
    assert_eq!(config.motion.tick.0, 25.0);
    assert_eq!(config.motion.step_acceleration.0, 0.5);

    let z = config.axis(AxisId::Z).expect("Z axis not found");
    assert_eq!(z.steps_per_revolution, 400);
    assert_eq!(z.mm_per_step.0, 0.125);
    assert_eq!(z.steps_per_mm(), 8.0);
    assert!(!z.invert_direction);
    assert!(config.axis(AxisId::Y).unwrap().invert_direction);

    assert_eq!(config.instrument.as_ref().expect("instrument missing").radius.0, 1.5);
    assert_eq!(config.configured_axes().count(), 3);
}

/// Test that omitted motion settings fall back to defaults.
#[test]
fn test_motion_defaults() {
    let toml_str = r#"
[axes.x]
steps_per_revolution = 200
mm_per_step = 1.0
travel_mm = 300.0

[axes.y]
steps_per_revolution = 200
mm_per_step = 1.0
travel_mm = 300.0
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(config.motion.tick.0, 50.0);
    assert_eq!(config.motion.step_acceleration.0, 0.07);
    assert_eq!(config.motion.feed_rate.0, 0.0);
    assert_eq!(config.motion.epsilon, DEFAULT_EPSILON);
    assert!(config.instrument.is_none());
    assert!(config.axis(AxisId::Z).is_none());
}

/// Test that unit fields deserialize from bare numbers.
#[test]
fn test_units_are_transparent() {
    let toml_str = r#"
[axes.x]
steps_per_revolution = 200
mm_per_step = 0.01
travel_mm = 1200.5
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let x = config.axis(AxisId::X).unwrap();
    assert_eq!(x.travel.0, 1200.5);
    assert!((x.steps_per_mm() - 100.0).abs() < 1e-3);
}
