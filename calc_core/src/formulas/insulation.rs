//! # Insulation Formulas
//!
//! Bag counts for batt/roll insulation and the depth needed to reach a
//! target R-value.

use serde::{Deserialize, Serialize};

use crate::units::{Inches, SqFt};

/// Coverage of one bag of fiberglass batts (ft²)
pub const DEFAULT_BAG_COVERAGE_SQFT: f64 = 40.0;

/// Default waste allowance for insulation
pub const DEFAULT_INSULATION_WASTE: f64 = 0.05;

/// Thermal resistance of fiberglass per inch of depth
pub const DEFAULT_R_PER_INCH: f64 = 3.2;

/// Insulation bag breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsulationBags {
    /// Area including waste (ft²)
    pub adjusted_area: f64,
    /// adjusted_area / coverage_per_bag, unrounded
    pub bags_needed: f64,
    /// Whole bags to buy
    pub total_bags: f64,
}

/// Calculate insulation bags for an area.
///
/// # Formulas
/// - adjusted = area × (1 + w)
/// - needed = adjusted / coverage
/// - total = ceil(needed)
pub fn calculate_insulation_bags(area_sqft: f64, coverage_per_bag: f64, waste_factor: f64) -> InsulationBags {
    let area = SqFt(area_sqft);
    let adjusted = area + area * waste_factor;
    let bags_needed = adjusted.value() / coverage_per_bag;
    InsulationBags {
        adjusted_area: adjusted.value(),
        bags_needed,
        total_bags: bags_needed.ceil(),
    }
}

/// Depth of insulation needed for a target R-value: R / (R per inch)
#[inline]
pub fn insulation_depth(target_r_value: f64, r_per_inch: f64) -> f64 {
    Inches(target_r_value / r_per_inch).value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bags_with_waste() {
        // 1000 ft² * 1.05 = 1050 / 40 = 26.25 -> 27
        let b = calculate_insulation_bags(1000.0, DEFAULT_BAG_COVERAGE_SQFT, DEFAULT_INSULATION_WASTE);
        assert!((b.adjusted_area - 1050.0).abs() < 1e-9);
        assert!((b.bags_needed - 26.25).abs() < 1e-9);
        assert_eq!(b.total_bags, 27.0);
    }

    #[test]
    fn test_depth_for_r30() {
        let d = insulation_depth(30.0, DEFAULT_R_PER_INCH);
        assert!((d - 9.375).abs() < 1e-9);
    }
}
