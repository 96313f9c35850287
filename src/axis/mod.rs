//! Axis module for cnc-motion.
//!
//! Per-axis identity, live counters and the pulse driver that owns the
//! axis's hardware lines.

mod driver;
mod id;
mod pins;
mod runtime;

pub use driver::Axis;
pub use id::AxisId;
pub use pins::AxisPins;
pub use runtime::{AxisRuntime, Direction};
