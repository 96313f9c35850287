//! Error types for cnc-motion.
//!
//! Covers configuration loading and hardware (pin/PWM) failures. Requests the
//! engine chooses not to act on are not errors; they are reported through
//! [`Outcome`](crate::Outcome).

use core::fmt;

use crate::axis::AxisId;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all cnc-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Output or input line operation failed
    Hardware(HardwareError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Tick length must be > 0
    InvalidTickLength(f32),
    /// Per-step acceleration increment must be > 0
    InvalidStepAcceleration(f32),
    /// Feed rate or start speed must be >= 0
    InvalidSpeed(f32),
    /// Zero threshold must be >= 0
    InvalidEpsilon(f32),
    /// Axis geometry rejected (non-positive travel, step size or steps/rev)
    InvalidAxisGeometry(AxisId),
    /// Both horizontal axes must be present
    MissingAxis(AxisId),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// A hardware line the engine drives or reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Step pulse output.
    Step,
    /// Direction output.
    Direction,
    /// Driver enable output.
    Enable,
    /// Limit sensor input.
    Limit,
}

/// Hardware operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HardwareError {
    /// Pin operation on an axis failed
    Pin {
        /// Axis owning the pin
        axis: AxisId,
        /// Which line failed
        line: Line,
    },
    /// Instrument power output rejected the duty cycle
    PowerOutput,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Hardware(e) => write!(f, "Hardware error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidTickLength(v) => write!(f, "Invalid tick length: {} us. Must be > 0", v),
            ConfigError::InvalidStepAcceleration(v) => {
                write!(f, "Invalid step acceleration: {}. Must be > 0", v)
            }
            ConfigError::InvalidSpeed(v) => write!(f, "Invalid speed: {}. Must be >= 0", v),
            ConfigError::InvalidEpsilon(v) => write!(f, "Invalid epsilon: {}. Must be >= 0", v),
            ConfigError::InvalidAxisGeometry(axis) => write!(f, "Invalid geometry for axis {}", axis),
            ConfigError::MissingAxis(axis) => write!(f, "Axis {} is required", axis),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Line::Step => "step",
            Line::Direction => "direction",
            Line::Enable => "enable",
            Line::Limit => "limit",
        };
        f.write_str(name)
    }
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareError::Pin { axis, line } => write!(f, "{} line of axis {} failed", line, axis),
            HardwareError::PowerOutput => write!(f, "Instrument power output failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Error::Hardware(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for HardwareError {}
