//! # Formula Library
//!
//! Pure functions for the quantity and cost math of each trade. Having the
//! formulas in one place enables:
//! - Easy verification against published coverage rates and rules of thumb
//! - Consistent implementation across calculators
//!
//! ## Contract
//!
//! - Never fail for numeric input. Zero or negative values simply propagate
//!   to zero or negative outputs; the engine rejects invalid input first.
//! - No I/O, no randomness, no mutation of arguments.
//! - No rounding unless the quantity is purchased in whole units
//!   (sheets, bags, quarts).
//!
//! ## Modules
//!
//! - [`concrete`] - Slab volume, waste, premix bags
//! - [`drywall`] - Room areas and sheet counts
//! - [`paint`] - Gallons by coverage
//! - [`insulation`] - Bag counts and depth for R-value
//! - [`cost`] - Material, labor, overhead & profit chain
//! - [`registry`] - Formula metadata for explanations and reference docs

pub mod concrete;
pub mod cost;
pub mod drywall;
pub mod insulation;
pub mod paint;
pub mod registry;

// Re-export commonly used items
pub use concrete::{calculate_concrete_volume, premix_bags, ConcreteVolume};
pub use cost::{
    calculate_labor_cost,
    calculate_material_cost,
    calculate_overhead_and_profit,
    calculate_project_cost,
    CostBreakdown,
    CostRates,
    LaborCost,
    MaterialCost,
    OverheadAndProfit,
};
pub use drywall::{calculate_drywall_sheets, net_area, room_ceiling_area, room_wall_area, DrywallSheets};
pub use insulation::{calculate_insulation_bags, insulation_depth, InsulationBags};
pub use paint::{calculate_paint_coverage, PaintCoverage};
pub use registry::{generate_formulas_markdown, Formula, FormulaGroup, FormulaMetadata, Variable, ALL_FORMULAS};
