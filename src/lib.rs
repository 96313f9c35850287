//! # cnc-motion
//!
//! Real-time motion core for a three-axis stepper router, with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Double-buffered moves**: Plan the next segment while the current one steps
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR/ENABLE, `InputPin` for limits,
//!   `SetDutyCycle` for the cutting tool
//! - **no_std compatible**: Core library works without standard library
//! - **Corner blending**: Entry speed follows the angle to the previous segment
//! - **Deterministic timing**: Every axis is stepped from the same fixed virtual tick
//! - **Configuration-driven**: Axis geometry and motion tuning from TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cnc_motion::{AxisId, AxisPins, LineRequest, MillimetersPerSec, Point3, Router};
//!
//! let config = cnc_motion::load_config("router.toml")?;
//! let mut router = Router::new(config.motion.clone())?;
//!
//! let x_pins = AxisPins::new().step_pin(x_step).dir_pin(x_dir).enable_pin(x_en);
//! router.configure_axis(AxisId::X, config.axis(AxisId::X).unwrap(), x_pins);
//! // ... same for Y (and optionally Z)
//!
//! router.prepare(&LineRequest::new(Point3::xy(100.0, 0.0), MillimetersPerSec(500.0)));
//! router.commit()?;
//!
//! // From a 50 µs timer
//! router.tick()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible everywhere
#[macro_use]
mod fmt;

// Core modules
pub mod axis;
pub mod config;
pub mod error;
pub mod instrument;
pub mod motion;
pub mod router;

// Re-exports for ergonomic API
pub use axis::{AxisId, AxisPins, Direction};
pub use config::{validate_config, validate_motion, AxisGeometry, MachineConfig, MotionSettings};
pub use error::{Error, Result};
pub use instrument::Instrument;
pub use motion::{JunctionContext, LineRequest, Lookahead, MotionPhase, MotionProfile, Point3};
pub use router::{Outcome, Router, Status};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Microseconds, Millimeters, MillimetersPerSec, UnitExt};
