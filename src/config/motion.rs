//! Motion engine settings.

use serde::Deserialize;

use super::units::{Microseconds, MillimetersPerSec};

/// Default virtual tick length in microseconds.
pub const DEFAULT_TICK_US: f32 = 50.0;

/// Default speed change per pacing-axis step, in mm/s.
pub const DEFAULT_STEP_ACCELERATION: f32 = 0.07;

/// Distances and feed rates at or below this are treated as zero.
pub const DEFAULT_EPSILON: f32 = 1e-6;

/// Motion engine tuning from the `[motion]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MotionSettings {
    /// Commanded feed rate used by `line_to`.
    #[serde(default, rename = "feed_rate_mm_per_sec")]
    pub feed_rate: MillimetersPerSec,

    /// Speed a move may start from without ramping; feeds above it are
    /// accelerated.
    #[serde(default, rename = "max_start_speed_mm_per_sec")]
    pub max_start_speed: MillimetersPerSec,

    /// Length of one scheduler tick.
    #[serde(default = "default_tick", rename = "tick_us")]
    pub tick: Microseconds,

    /// Speed gained or lost per step of the pacing axis.
    #[serde(default = "default_step_acceleration", rename = "step_accel_mm_per_sec")]
    pub step_acceleration: MillimetersPerSec,

    /// Zero threshold for lengths and speeds.
    #[serde(default = "default_epsilon")]
    pub epsilon: f32,
}

fn default_tick() -> Microseconds {
    Microseconds(DEFAULT_TICK_US)
}

fn default_step_acceleration() -> MillimetersPerSec {
    MillimetersPerSec(DEFAULT_STEP_ACCELERATION)
}

fn default_epsilon() -> f32 {
    DEFAULT_EPSILON
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            feed_rate: MillimetersPerSec::default(),
            max_start_speed: MillimetersPerSec::default(),
            tick: default_tick(),
            step_acceleration: default_step_acceleration(),
            epsilon: default_epsilon(),
        }
    }
}

impl MotionSettings {
    /// Set the commanded feed rate.
    pub fn with_feed_rate(mut self, feed_rate: MillimetersPerSec) -> Self {
        self.feed_rate = feed_rate;
        self
    }

    /// Set the maximum unramped start speed.
    pub fn with_max_start_speed(mut self, speed: MillimetersPerSec) -> Self {
        self.max_start_speed = speed;
        self
    }

    /// Set the tick length.
    pub fn with_tick(mut self, tick: Microseconds) -> Self {
        self.tick = tick;
        self
    }

    /// Set the per-step speed increment.
    pub fn with_step_acceleration(mut self, step_acceleration: MillimetersPerSec) -> Self {
        self.step_acceleration = step_acceleration;
        self
    }
}
