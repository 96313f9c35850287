//! Corner-speed blending between consecutive segments.

use libm::sqrtf;

/// Continuity carried from one prepared segment to the next.
///
/// Holds the cosine of the last planned corner and the speed the last
/// segment actually reaches at its end. The next segment's start speed blends
/// the two.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JunctionContext {
    /// Cosine of the corner at the end of the last segment, in `[0, 1]`.
    pub cosine: f32,
    /// Exit speed the last segment achieves, mm/s.
    pub exit_speed: f32,
}

impl JunctionContext {
    /// Start speed for the next segment.
    ///
    /// Blends the carried exit speed with `min_start` by the carried corner
    /// cosine: a straight continuation keeps the exit speed, a square corner
    /// starts from `min_start`. Never below `min_start`.
    pub fn start_speed(&self, min_start: f32) -> f32 {
        let blended = (self.exit_speed - min_start) * self.cosine + min_start;
        blended.max(min_start)
    }

    /// Record the corner and exit speed of a newly prepared segment.
    pub fn carry(&mut self, cosine: f32, exit_speed: f32) {
        self.cosine = cosine;
        self.exit_speed = exit_speed;
    }

    /// Forget the previous segment; the next one starts from rest.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Cosine of the angle between two segment vectors, clamped to `[0, 1]`.
///
/// Corners of 90° or sharper plan a full stop, so negative cosines clamp to
/// zero. Degenerate vectors (product of lengths at or below `epsilon`, or not
/// finite) also give zero.
pub fn junction_cosine(current: [f32; 3], next: [f32; 3], epsilon: f32) -> f32 {
    let len_a = norm(current);
    let len_b = norm(next);
    let denom = len_a * len_b;
    if !(denom > epsilon && denom.is_finite()) {
        return 0.0;
    }

    let dot = current[0] * next[0] + current[1] * next[1] + current[2] * next[2];
    (dot / denom).clamp(0.0, 1.0)
}

/// Euclidean length of a vector.
#[inline]
pub fn norm(v: [f32; 3]) -> f32 {
    sqrtf(v[0] * v[0] + v[1] * v[1] + v[2] * v[2])
}
