//! Speed multiplier ramp applied by the tick scheduler.

/// Lowest speed multiplier; motion never stalls mid-deceleration.
pub const MIN_SPEED_MULTIPLIER: f32 = 0.05;

/// Phase of the acceleration envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Multiplier rising toward 1.0.
    Accelerating,
    /// Running at the commanded feed.
    Cruising,
    /// Multiplier falling toward the finish speed.
    Decelerating,
    /// No move in progress.
    Complete,
}

/// Acceleration envelope of the live move.
///
/// The scheduler scales each tick by `multiplier`; the pacing axis nudges the
/// multiplier once per emitted step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRamp {
    /// Whether the envelope is active for this move.
    pub accelerated: bool,
    /// Current fraction of the commanded feed, in `[MIN_SPEED_MULTIPLIER, 1.0]`.
    pub multiplier: f32,
    /// Multiplier change per pacing step.
    pub increment: f32,
    /// Deceleration begins once the pacing axis has fewer steps left than this.
    pub deceleration_steps: u32,
}

impl Default for SpeedRamp {
    fn default() -> Self {
        Self::constant()
    }
}

impl SpeedRamp {
    /// A flat envelope: full speed, never touched.
    pub const fn constant() -> Self {
        Self {
            accelerated: false,
            multiplier: 1.0,
            increment: 0.0,
            deceleration_steps: 0,
        }
    }

    /// Tick length after scaling by the envelope.
    #[inline]
    pub fn scale(&self, tick_us: f32) -> f32 {
        if self.accelerated {
            tick_us * self.multiplier
        } else {
            tick_us
        }
    }

    /// Update after the pacing axis emitted a step leaving `steps_left`.
    pub fn on_pacing_step(&mut self, steps_left: u32) {
        if !self.accelerated {
            return;
        }

        if steps_left < self.deceleration_steps {
            self.multiplier = (self.multiplier - self.increment).max(MIN_SPEED_MULTIPLIER);
        } else if self.multiplier < 1.0 {
            self.multiplier = (self.multiplier + self.increment).min(1.0);
        }
    }

    /// Phase given the pacing axis's remaining steps.
    pub fn phase(&self, steps_left: u32) -> MotionPhase {
        if steps_left == 0 {
            MotionPhase::Complete
        } else if self.accelerated && steps_left < self.deceleration_steps {
            MotionPhase::Decelerating
        } else if self.accelerated && self.multiplier < 1.0 {
            MotionPhase::Accelerating
        } else {
            MotionPhase::Cruising
        }
    }
}
