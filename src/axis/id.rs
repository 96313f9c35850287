//! Axis identifiers.

use core::fmt;

/// One of the three linear axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisId {
    /// Horizontal X axis.
    X,
    /// Horizontal Y axis.
    Y,
    /// Vertical Z axis.
    Z,
}

impl AxisId {
    /// All axes in scan order.
    pub const ALL: [AxisId; 3] = [AxisId::X, AxisId::Y, AxisId::Z];

    /// Slot index of this axis.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            AxisId::X => 0,
            AxisId::Y => 1,
            AxisId::Z => 2,
        }
    }

    /// Whether the axis is one of the two required horizontal axes.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, AxisId::X | AxisId::Y)
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AxisId::X => "X",
            AxisId::Y => "Y",
            AxisId::Z => "Z",
        };
        f.write_str(name)
    }
}
