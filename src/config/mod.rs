//! Configuration module for cnc-motion.
//!
//! Provides types for loading and validating axis geometry and motion tuning
//! from TOML files (with `std` feature) or building them in code.

mod axis;
mod machine;
mod mechanical;
mod motion;
pub mod units;
#[cfg(feature = "std")]
mod loader;
pub(crate) mod validation;

pub use axis::AxisGeometry;
pub use machine::{AxesConfig, InstrumentConfig, MachineConfig};
pub use mechanical::AxisScale;
pub use motion::{MotionSettings, DEFAULT_EPSILON, DEFAULT_STEP_ACCELERATION, DEFAULT_TICK_US};
pub use validation::{validate_config, validate_motion};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Microseconds, Millimeters, MillimetersPerSec};
