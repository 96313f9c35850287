//! Step scale derived from axis geometry.

use super::axis::AxisGeometry;
use super::units::Millimeters;

/// Derived per-axis parameters computed from [`AxisGeometry`].
///
/// These are computed once when the axis is configured and used for all
/// profile math on that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    /// Full steps per motor revolution.
    pub steps_per_revolution: u16,

    /// Steps per millimeter of travel (reciprocal of mm per step).
    pub steps_per_mm: f32,

    /// Usable travel length.
    pub travel: Millimeters,

    /// Whether direction line logic is inverted.
    pub invert_direction: bool,
}

impl AxisScale {
    /// Compute the scale from axis geometry.
    pub fn from_geometry(geometry: &AxisGeometry) -> Self {
        Self {
            steps_per_revolution: geometry.steps_per_revolution,
            steps_per_mm: geometry.steps_per_mm(),
            travel: geometry.travel,
            invert_direction: geometry.invert_direction,
        }
    }

    /// Whole steps covered by a distance, truncating the fraction.
    #[inline]
    pub fn mm_to_steps(&self, distance: f32) -> u32 {
        (libm::fabsf(distance) * self.steps_per_mm) as u32
    }

    /// Length of a number of steps.
    #[inline]
    pub fn steps_to_mm(&self, steps: u32) -> f32 {
        steps as f32 / self.steps_per_mm
    }

    /// Travel per motor revolution.
    #[inline]
    pub fn mm_per_revolution(&self) -> Millimeters {
        Millimeters(self.steps_to_mm(self.steps_per_revolution as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_geometry() -> AxisGeometry {
        AxisGeometry::new(200, Millimeters(0.025), Millimeters(300.0))
    }

    #[test]
    fn test_steps_per_mm() {
        let scale = AxisScale::from_geometry(&make_test_geometry());
        assert!((scale.steps_per_mm - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_truncating_conversion() {
        let scale = AxisScale::from_geometry(&make_test_geometry());

        // 10.01 mm * 40 = 400.4 steps, the fraction is dropped
        assert_eq!(scale.mm_to_steps(10.01), 400);
        assert_eq!(scale.mm_to_steps(-10.01), 400);
    }

    #[test]
    fn test_mm_per_revolution() {
        let scale = AxisScale::from_geometry(&make_test_geometry());

        // 200 steps * 0.025 mm
        assert!((scale.mm_per_revolution().0 - 5.0).abs() < 1e-3);
    }
}
