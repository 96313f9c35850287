//! Live motion counters for one axis.

/// Direction of travel along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Toward larger coordinates.
    #[default]
    Positive,
    /// Toward smaller coordinates.
    Negative,
}

impl Direction {
    /// Get direction from a signed distance. Zero counts as positive.
    #[inline]
    pub fn from_delta(delta: f32) -> Self {
        if delta < 0.0 {
            Direction::Negative
        } else {
            Direction::Positive
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }

    /// Whether travel is toward the negative end.
    #[inline]
    pub fn is_negative(self) -> bool {
        self == Direction::Negative
    }
}

/// Motion counters for one axis.
///
/// The router keeps two of these per axis: the live set the scheduler steps,
/// and the prepared set inside a [`MotionProfile`](crate::MotionProfile)
/// waiting to be committed. Committing is a plain value copy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisRuntime {
    /// Position in millimeters at the end of the current (or prepared) move.
    pub position: f32,

    /// Steps still to emit.
    pub steps_left: u32,

    /// Time between steps in microseconds.
    pub step_interval_us: f32,

    /// Time accumulated toward the next step.
    pub elapsed_us: f32,

    /// Direction of travel.
    pub direction: Direction,

    /// Last level written to the step line.
    pub pulse_high: bool,
}

impl AxisRuntime {
    /// An axis at rest at `position`.
    pub fn at_rest(position: f32) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Whether steps remain.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.steps_left > 0
    }

    /// Position actually reached, given the steps not yet emitted.
    #[inline]
    pub fn reached_position(&self, steps_per_mm: f32) -> f32 {
        self.position - self.direction.sign() * self.steps_left as f32 / steps_per_mm
    }

    /// Add elapsed time toward the next step.
    #[inline]
    pub fn accumulate(&mut self, elapsed_us: f32) {
        self.elapsed_us += elapsed_us;
    }

    /// Whether the accumulator has reached the step interval.
    #[inline]
    pub fn step_due(&self) -> bool {
        self.steps_left > 0 && self.elapsed_us >= self.step_interval_us
    }

    /// Book one emitted step.
    #[inline]
    pub fn consume_step(&mut self) {
        self.steps_left -= 1;
        self.elapsed_us -= self.step_interval_us;
    }

    /// Drop any remaining steps.
    pub fn halt(&mut self) {
        self.steps_left = 0;
        self.elapsed_us = 0.0;
    }
}
