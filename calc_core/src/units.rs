//! # Unit Types
//!
//! Type-safe wrappers for the construction units used by the formula library.
//! They prevent unit confusion in the formulas while remaining lightweight
//! (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Estimating uses a small, consistent set of US customary units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Units
//!
//! - Length: feet (ft), inches (in)
//! - Area: square feet (ft²)
//! - Volume: cubic feet (ft³), cubic yards (yd³)
//! - Liquid: US gallons (gal)
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{CuFt, CuYd, Feet, Inches};
//!
//! let slab: Feet = Inches(6.0).into();
//! assert_eq!(slab.0, 0.5);
//!
//! let yards: CuYd = CuFt(54.0).into();
//! assert_eq!(yards.0, 2.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Cubic feet per cubic yard
pub const CUBIC_FEET_PER_YARD: f64 = 27.0;

/// Quarts per US gallon
pub const QUARTS_PER_GALLON: f64 = 4.0;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * INCHES_PER_FOOT)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / INCHES_PER_FOOT)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

impl Mul<Feet> for Feet {
    type Output = SqFt;
    fn mul(self, rhs: Feet) -> SqFt {
        SqFt(self.0 * rhs.0)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in cubic feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuFt(pub f64);

/// Volume in cubic yards
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuYd(pub f64);

impl Mul<Feet> for SqFt {
    type Output = CuFt;
    fn mul(self, rhs: Feet) -> CuFt {
        CuFt(self.0 * rhs.0)
    }
}

impl From<CuFt> for CuYd {
    fn from(cuft: CuFt) -> Self {
        CuYd(cuft.0 / CUBIC_FEET_PER_YARD)
    }
}

impl From<CuYd> for CuFt {
    fn from(cuyd: CuYd) -> Self {
        CuFt(cuyd.0 * CUBIC_FEET_PER_YARD)
    }
}

// ============================================================================
// Liquid Units
// ============================================================================

/// Liquid volume in US gallons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gallons(pub f64);

impl Gallons {
    /// Round up to the next whole quart (quarter gallon), the smallest can size.
    pub fn round_up_to_quart(self) -> Self {
        Gallons((self.0 * QUARTS_PER_GALLON).ceil() / QUARTS_PER_GALLON)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(SqFt);
impl_arithmetic!(CuFt);
impl_arithmetic!(CuYd);
impl_arithmetic!(Gallons);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_to_feet() {
        let ft: Feet = Inches(4.0).into();
        assert!((ft.0 - 0.3333).abs() < 1e-4);
    }

    #[test]
    fn test_slab_volume_in_yards() {
        let area = Feet(20.0) * Feet(12.0);
        let volume = area * Feet(1.0);
        let yards: CuYd = volume.into();
        assert_eq!(area.0, 240.0);
        assert!((yards.0 - 8.8889).abs() < 1e-4);
    }

    #[test]
    fn test_round_up_to_quart() {
        assert_eq!(Gallons(3.43).round_up_to_quart().0, 3.5);
        assert_eq!(Gallons(2.0).round_up_to_quart().0, 2.0);
        assert_eq!(Gallons(0.01).round_up_to_quart().0, 0.25);
    }

    #[test]
    fn test_arithmetic() {
        let a = CuYd(10.0);
        let b = CuYd(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let g = Gallons(3.5);
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "3.5");
    }
}
