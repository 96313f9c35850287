//! Axis geometry from TOML.

use serde::Deserialize;

use super::units::Millimeters;

/// Geometry of one linear axis.
///
/// Pin identities are not part of the file; they are handed to the router as
/// typed `embedded-hal` pins when the axis is configured.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AxisGeometry {
    /// Full steps per motor revolution (200 for 1.8° motors).
    pub steps_per_revolution: u16,

    /// Carriage travel per emitted step.
    pub mm_per_step: Millimeters,

    /// Usable travel length.
    #[serde(rename = "travel_mm")]
    pub travel: Millimeters,

    /// Invert direction line polarity.
    #[serde(default)]
    pub invert_direction: bool,
}

impl AxisGeometry {
    /// Create axis geometry with the default direction polarity.
    pub fn new(steps_per_revolution: u16, mm_per_step: Millimeters, travel: Millimeters) -> Self {
        Self {
            steps_per_revolution,
            mm_per_step,
            travel,
            invert_direction: false,
        }
    }

    /// Return a copy with the direction polarity inverted.
    pub fn inverted(mut self) -> Self {
        self.invert_direction = true;
        self
    }

    /// Check whether this geometry can drive motion.
    ///
    /// Travel and step size must both be above `epsilon`, and the motor must
    /// have at least one step per revolution.
    pub fn is_valid(&self, epsilon: f32) -> bool {
        self.steps_per_revolution > 0 && self.travel.0 > epsilon && self.mm_per_step.0 > epsilon
    }

    /// Steps per millimeter of travel.
    #[inline]
    pub fn steps_per_mm(&self) -> f32 {
        1.0 / self.mm_per_step.0
    }
}
