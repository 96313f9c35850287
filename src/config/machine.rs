//! Machine configuration - root configuration structure.

use serde::Deserialize;

use crate::axis::AxisId;

use super::axis::AxisGeometry;
use super::motion::MotionSettings;
use super::units::Millimeters;

/// Geometry for the three linear axes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AxesConfig {
    /// Horizontal X axis (required).
    #[serde(default)]
    pub x: Option<AxisGeometry>,
    /// Horizontal Y axis (required).
    #[serde(default)]
    pub y: Option<AxisGeometry>,
    /// Vertical Z axis (optional).
    #[serde(default)]
    pub z: Option<AxisGeometry>,
}

/// Cutting tool settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InstrumentConfig {
    /// Cutter radius; informational only.
    #[serde(default, rename = "radius_mm")]
    pub radius: Millimeters,
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MachineConfig {
    /// Motion engine tuning.
    #[serde(default)]
    pub motion: MotionSettings,

    /// Axis geometry.
    #[serde(default)]
    pub axes: AxesConfig,

    /// Optional cutting tool.
    #[serde(default)]
    pub instrument: Option<InstrumentConfig>,
}

impl MachineConfig {
    /// Get the geometry of an axis, if present.
    pub fn axis(&self, axis: AxisId) -> Option<&AxisGeometry> {
        match axis {
            AxisId::X => self.axes.x.as_ref(),
            AxisId::Y => self.axes.y.as_ref(),
            AxisId::Z => self.axes.z.as_ref(),
        }
    }

    /// Iterate over the axes present in the configuration.
    pub fn configured_axes(&self) -> impl Iterator<Item = (AxisId, &AxisGeometry)> {
        AxisId::ALL
            .into_iter()
            .filter_map(move |id| self.axis(id).map(|geometry| (id, geometry)))
    }
}
