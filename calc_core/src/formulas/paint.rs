//! # Paint Formulas

use serde::{Deserialize, Serialize};

use crate::units::Gallons;

/// Default number of coats
pub const DEFAULT_COATS: f64 = 2.0;

/// Typical spread rate of one gallon of latex paint (ft²/gal)
pub const DEFAULT_COVERAGE_SQFT_PER_GAL: f64 = 350.0;

/// Paint quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintCoverage {
    /// Exact gallons required
    pub gallons: f64,
    /// Gallons rounded up to the nearest quarter gallon
    pub gallons_rounded: f64,
}

/// Calculate paint quantity for an area.
///
/// # Formulas
/// - gal = area × coats / coverage
/// - rounded = ceil(gal × 4) / 4
///
/// # Example
///
/// ```rust
/// use calc_core::formulas::paint::calculate_paint_coverage;
///
/// let p = calculate_paint_coverage(600.0, 2.0, 350.0);
/// assert_eq!(p.gallons_rounded, 3.5);
/// ```
pub fn calculate_paint_coverage(area_sqft: f64, coats: f64, coverage_sqft_per_gal: f64) -> PaintCoverage {
    let gallons = Gallons(area_sqft * coats / coverage_sqft_per_gal);
    PaintCoverage {
        gallons: gallons.value(),
        gallons_rounded: gallons.round_up_to_quart().value(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_paint() {
        let p = calculate_paint_coverage(600.0, 2.0, 350.0);
        assert!((p.gallons - 3.43).abs() < 0.01, "gallons = {}", p.gallons);
        assert_eq!(p.gallons_rounded, 3.5);
    }

    #[test]
    fn test_single_coat_exact_gallon() {
        let p = calculate_paint_coverage(350.0, 1.0, DEFAULT_COVERAGE_SQFT_PER_GAL);
        assert_eq!(p.gallons, 1.0);
        assert_eq!(p.gallons_rounded, 1.0);
    }

    #[test]
    fn test_zero_area() {
        let p = calculate_paint_coverage(0.0, DEFAULT_COATS, DEFAULT_COVERAGE_SQFT_PER_GAL);
        assert_eq!(p.gallons_rounded, 0.0);
    }
}
