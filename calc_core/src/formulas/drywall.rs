//! # Drywall Formulas
//!
//! Wall/ceiling area takeoff and sheet counts.

use serde::{Deserialize, Serialize};

use crate::units::{Feet, SqFt};

/// Area of a standard 4 × 8 ft sheet (ft²)
pub const DEFAULT_SHEET_SIZE: f64 = 32.0;

/// Default waste allowance for drywall
pub const DEFAULT_DRYWALL_WASTE: f64 = 0.1;

/// Sheet count breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrywallSheets {
    /// area / sheet_size, unrounded
    pub sheets_needed: f64,
    /// sheets_needed × waste factor, unrounded
    pub waste_sheets: f64,
    /// ceil(sheets_needed + waste_sheets)
    pub total_sheets: f64,
}

/// Calculate drywall sheets for a surface area.
///
/// # Formulas
/// - needed = area / sheet_size
/// - waste = needed × w
/// - total = ceil(needed + waste)
pub fn calculate_drywall_sheets(area_sqft: f64, sheet_size_sqft: f64, waste_factor: f64) -> DrywallSheets {
    let sheets_needed = area_sqft / sheet_size_sqft;
    let waste_sheets = sheets_needed * waste_factor;
    DrywallSheets {
        sheets_needed,
        waste_sheets,
        total_sheets: (sheets_needed + waste_sheets).ceil(),
    }
}

/// Gross wall area of a rectangular room: 2(L + W) × H
#[inline]
pub fn room_wall_area(length_ft: f64, width_ft: f64, height_ft: f64) -> f64 {
    let perimeter = (Feet(length_ft) + Feet(width_ft)) * 2.0;
    let area: SqFt = perimeter * Feet(height_ft);
    area.value()
}

/// Ceiling (floor-plan) area of a rectangular room: L × W
#[inline]
pub fn room_ceiling_area(length_ft: f64, width_ft: f64) -> f64 {
    (Feet(length_ft) * Feet(width_ft)).value()
}

/// Net area after subtracting doors and windows.
#[inline]
pub fn net_area(gross_sqft: f64, openings_sqft: f64) -> f64 {
    (SqFt(gross_sqft) - SqFt(openings_sqft)).value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sheets() {
        let s = calculate_drywall_sheets(500.0, 32.0, 0.1);
        assert_eq!(s.sheets_needed, 15.625);
        assert!((s.waste_sheets - 1.5625).abs() < 1e-12);
        // ceil(15.625 × 1.1) = ceil(17.1875) = 18
        assert_eq!(s.total_sheets, 18.0);
    }

    #[test]
    fn test_exact_fit_has_no_extra_sheet() {
        let s = calculate_drywall_sheets(320.0, DEFAULT_SHEET_SIZE, 0.0);
        assert_eq!(s.total_sheets, 10.0);
    }

    #[test]
    fn test_room_areas() {
        // 12 x 10 room, 8 ft walls: 2(22) * 8 = 352
        assert_eq!(room_wall_area(12.0, 10.0, 8.0), 352.0);
        assert_eq!(room_ceiling_area(12.0, 10.0), 120.0);
        assert_eq!(net_area(352.0, 40.0), 312.0);
    }
}
