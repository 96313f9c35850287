//! Unit types for physical quantities.
//!
//! Keeps lengths, feed rates and tick lengths apart at compile time. All values
//! are `f32`, matching the single-precision FPUs of the targets this runs on.

use core::ops::{Add, Mul, Sub};

use serde::Deserialize;

/// Linear length in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Millimeters(pub f32);

impl Millimeters {
    /// Create a new Millimeters value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Add for Millimeters {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Millimeters {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Feed rate in millimeters per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct MillimetersPerSec(pub f32);

impl MillimetersPerSec {
    /// Create a new MillimetersPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Mul<f32> for MillimetersPerSec {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Time span in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Microseconds(pub f32);

impl Microseconds {
    /// Create a new Microseconds value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Millimeters.
    fn mm(self) -> Millimeters;
    /// Convert to MillimetersPerSec.
    fn mm_per_sec(self) -> MillimetersPerSec;
    /// Convert to Microseconds.
    fn micros(self) -> Microseconds;
}

impl UnitExt for f32 {
    #[inline]
    fn mm(self) -> Millimeters {
        Millimeters(self)
    }

    #[inline]
    fn mm_per_sec(self) -> MillimetersPerSec {
        MillimetersPerSec(self)
    }

    #[inline]
    fn micros(self) -> Microseconds {
        Microseconds(self)
    }
}
