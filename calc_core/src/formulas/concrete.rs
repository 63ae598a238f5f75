//! # Concrete Formulas
//!
//! Slab volume with waste allowance, and premixed bag counts.
//!
//! ## Notation
//!
//! - `L` = Slab length (ft)
//! - `W` = Slab width (ft)
//! - `T` = Slab thickness (in)
//! - `w` = Waste factor (fraction, e.g. 0.2 = 20%)
//!
//! No rounding happens here; rounding is a display concern.

use serde::{Deserialize, Serialize};

use crate::units::{CuFt, CuYd, Feet, Inches};

/// Default waste allowance for poured concrete
pub const DEFAULT_CONCRETE_WASTE: f64 = 0.2;

/// Yield of one 80 lb bag of premixed concrete, in cubic feet
pub const BAG_80LB_YIELD_CUFT: f64 = 0.6;

/// Slab volume breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteVolume {
    /// Raw volume L × W × T/12 (ft³)
    pub cubic_feet: f64,
    /// Raw volume (yd³)
    pub cubic_yards: f64,
    /// Waste allowance (yd³)
    pub waste_amount: f64,
    /// Volume to order including waste (yd³)
    pub total_volume: f64,
}

/// Calculate slab volume with waste.
///
/// # Formulas
/// - ft³ = L × W × (T / 12)
/// - yd³ = ft³ / 27
/// - waste = yd³ × w
/// - total = yd³ + waste
///
/// # Example
///
/// ```rust
/// use calc_core::formulas::concrete::calculate_concrete_volume;
///
/// let v = calculate_concrete_volume(20.0, 12.0, 4.0, 0.2);
/// assert!((v.total_volume - 3.56).abs() < 0.01);
/// ```
pub fn calculate_concrete_volume(length_ft: f64, width_ft: f64, thickness_in: f64, waste_factor: f64) -> ConcreteVolume {
    let thickness: Feet = Inches(thickness_in).into();
    let cubic_feet: CuFt = Feet(length_ft) * Feet(width_ft) * thickness;
    let cubic_yards: CuYd = cubic_feet.into();
    let waste_amount = cubic_yards * waste_factor;
    let total_volume = cubic_yards + waste_amount;

    ConcreteVolume {
        cubic_feet: cubic_feet.value(),
        cubic_yards: cubic_yards.value(),
        waste_amount: waste_amount.value(),
        total_volume: total_volume.value(),
    }
}

/// Number of premixed bags for a volume in cubic yards, rounded up.
///
/// # Formula
/// - bags = ceil(yd³ × 27 / bag_yield)
#[inline]
pub fn premix_bags(total_yards: f64, bag_yield_cuft: f64) -> f64 {
    let cubic_feet: CuFt = CuYd(total_yards).into();
    (cubic_feet.value() / bag_yield_cuft).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_reference_slab() {
        // 20 x 12 ft slab, 4 in thick, 20% waste
        // ft³ = 80, yd³ = 2.963, waste = 0.593, total = 3.556
        let v = calculate_concrete_volume(20.0, 12.0, 4.0, 0.2);
        assert!(approx_eq(v.cubic_feet, 80.0, 1e-9));
        assert!(approx_eq(v.cubic_yards, 2.9630, 1e-3));
        assert!(approx_eq(v.waste_amount, 0.5926, 1e-3));
        assert!(approx_eq(v.total_volume, 3.56, 0.01), "total = {}", v.total_volume);
    }

    #[test]
    fn test_no_waste() {
        let v = calculate_concrete_volume(27.0, 1.0, 12.0, 0.0);
        assert!(approx_eq(v.total_volume, 1.0, 1e-12));
        assert_eq!(v.waste_amount, 0.0);
    }

    #[test]
    fn test_zero_and_negative_propagate() {
        let zero = calculate_concrete_volume(0.0, 12.0, 4.0, DEFAULT_CONCRETE_WASTE);
        assert_eq!(zero.total_volume, 0.0);

        let negative = calculate_concrete_volume(-10.0, 12.0, 4.0, DEFAULT_CONCRETE_WASTE);
        assert!(negative.total_volume < 0.0);
    }

    #[test]
    fn test_premix_bags() {
        // 1 yd³ = 27 ft³ / 0.6 = 45 bags
        assert_eq!(premix_bags(1.0, BAG_80LB_YIELD_CUFT), 45.0);
        // 0.1 yd³ = 2.7 ft³ / 0.6 = 4.5 -> 5
        assert_eq!(premix_bags(0.1, BAG_80LB_YIELD_CUFT), 5.0);
    }
}
