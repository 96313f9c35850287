//! Motion requests as supplied by the command source.

use crate::config::units::MillimetersPerSec;

/// A point in machine coordinates, millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Point3 {
    /// Create a point.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A point in the XY plane.
    #[inline]
    pub const fn xy(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Coordinates as an array in axis order.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Build from an array in axis order.
    #[inline]
    pub const fn from_array(v: [f32; 3]) -> Self {
        Self {
            x: v[0],
            y: v[1],
            z: v[2],
        }
    }
}

/// The segment after the one being prepared, used only for corner blending.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lookahead {
    /// End point of the following segment.
    pub target: Point3,
    /// Feed rate of the following segment; `None` means same as current.
    pub feed_rate: Option<MillimetersPerSec>,
}

/// A straight-line move request.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineRequest {
    /// End point of the segment.
    pub target: Point3,
    /// Feed rate along the segment.
    pub feed_rate: MillimetersPerSec,
    /// Optional next segment.
    pub next: Option<Lookahead>,
}

impl LineRequest {
    /// A move that plans to stop at its end point.
    pub fn new(target: Point3, feed_rate: MillimetersPerSec) -> Self {
        Self {
            target,
            feed_rate,
            next: None,
        }
    }

    /// Add the following point, reusing this segment's feed rate.
    pub fn then(mut self, next: Point3) -> Self {
        self.next = Some(Lookahead {
            target: next,
            feed_rate: None,
        });
        self
    }

    /// Add the following point with its own feed rate.
    pub fn then_at(mut self, next: Point3, feed_rate: MillimetersPerSec) -> Self {
        self.next = Some(Lookahead {
            target: next,
            feed_rate: Some(feed_rate),
        });
        self
    }
}
