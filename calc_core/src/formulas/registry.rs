//! # Formula Registry
//!
//! Central registry of every formula in the library. Each formula has
//! metadata including a plain-text rendering and variable definitions,
//! used by calculator `explain` output and the formula reference listing.
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::formulas::registry::Formula;
//!
//! let meta = Formula::CubicYards.metadata();
//! assert_eq!(meta.formula_plain, "yd3 = ft3 / 27");
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Formula Groups
// ============================================================================

/// Groups for organizing formulas in the reference listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormulaGroup {
    /// Areas of walls, ceilings, and openings
    Takeoff,
    Concrete,
    Drywall,
    Paint,
    Insulation,
    /// Material, labor, overhead and profit
    Cost,
}

impl FormulaGroup {
    /// Display name for the group
    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaGroup::Takeoff => "Area Takeoff",
            FormulaGroup::Concrete => "Concrete",
            FormulaGroup::Drywall => "Drywall",
            FormulaGroup::Paint => "Paint",
            FormulaGroup::Insulation => "Insulation",
            FormulaGroup::Cost => "Cost & Markup",
        }
    }

    /// Sort order for the reference listing (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            FormulaGroup::Takeoff => 1,
            FormulaGroup::Concrete => 2,
            FormulaGroup::Drywall => 3,
            FormulaGroup::Paint => 4,
            FormulaGroup::Insulation => 5,
            FormulaGroup::Cost => 6,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in a formula.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "L", "w")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "ft", "yd3", "$")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Formula Metadata
// ============================================================================

/// Complete metadata for a formula.
#[derive(Debug, Clone)]
pub struct FormulaMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this formula calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Group for the reference listing
    pub group: FormulaGroup,
    /// Function implementing the formula
    pub source_function: &'static str,
}

// ============================================================================
// Formula Enum
// ============================================================================

/// All formulas used by the calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Formula {
    /// A = 2(L + W) × H
    RoomWallArea,
    /// A = L × W
    RoomCeilingArea,
    /// A_net = A_gross - A_openings
    NetArea,
    /// ft3 = L × W × T/12
    SlabVolume,
    /// yd3 = ft3 / 27
    CubicYards,
    /// total = yd3 × (1 + w)
    WasteAllowance,
    /// bags = ceil(yd3 × 27 / yield)
    PremixBags,
    /// total = ceil(A/S × (1 + w))
    DrywallSheets,
    /// gal = A × coats / coverage
    PaintGallons,
    /// ceil(gal × 4) / 4
    QuartRounding,
    /// bags = ceil(A × (1 + w) / coverage)
    InsulationBags,
    /// d = R / (R per inch)
    InsulationDepth,
    /// Q × P × (1 + m)
    MaterialCost,
    /// H × r × (1 + b)
    LaborCost,
    /// S × (1 + o) × (1 + p)
    OverheadAndProfit,
}

impl Formula {
    /// Get the full metadata for this formula
    pub fn metadata(&self) -> FormulaMetadata {
        match self {
            Formula::RoomWallArea => FormulaMetadata {
                name: "Room Wall Area",
                description: "Gross wall area of a rectangular room",
                formula_plain: "A = 2(L + W) x H",
                variables: vec![
                    Variable::new("L", "Room length", "ft"),
                    Variable::new("W", "Room width", "ft"),
                    Variable::new("H", "Wall height", "ft"),
                ],
                group: FormulaGroup::Takeoff,
                source_function: "drywall::room_wall_area",
            },
            Formula::RoomCeilingArea => FormulaMetadata {
                name: "Ceiling Area",
                description: "Plan area of a rectangular room",
                formula_plain: "A = L x W",
                variables: vec![
                    Variable::new("L", "Room length", "ft"),
                    Variable::new("W", "Room width", "ft"),
                ],
                group: FormulaGroup::Takeoff,
                source_function: "drywall::room_ceiling_area",
            },
            Formula::NetArea => FormulaMetadata {
                name: "Net Area",
                description: "Surface area after deducting doors and windows",
                formula_plain: "A_net = A_gross - A_openings",
                variables: vec![
                    Variable::new("A_gross", "Gross surface area", "ft2"),
                    Variable::new("A_openings", "Area of doors and windows", "ft2"),
                ],
                group: FormulaGroup::Takeoff,
                source_function: "drywall::net_area",
            },
            Formula::SlabVolume => FormulaMetadata {
                name: "Slab Volume",
                description: "Volume of a rectangular slab with thickness in inches",
                formula_plain: "ft3 = L x W x (T / 12)",
                variables: vec![
                    Variable::new("L", "Slab length", "ft"),
                    Variable::new("W", "Slab width", "ft"),
                    Variable::new("T", "Slab thickness", "in"),
                ],
                group: FormulaGroup::Concrete,
                source_function: "concrete::calculate_concrete_volume",
            },
            Formula::CubicYards => FormulaMetadata {
                name: "Cubic Yards",
                description: "Convert cubic feet to cubic yards",
                formula_plain: "yd3 = ft3 / 27",
                variables: vec![Variable::new("ft3", "Volume", "ft3")],
                group: FormulaGroup::Concrete,
                source_function: "concrete::calculate_concrete_volume",
            },
            Formula::WasteAllowance => FormulaMetadata {
                name: "Waste Allowance",
                description: "Order quantity including cutting and spillage loss",
                formula_plain: "total = yd3 + yd3 x w",
                variables: vec![
                    Variable::new("yd3", "Net volume", "yd3"),
                    Variable::new("w", "Waste factor", "fraction"),
                ],
                group: FormulaGroup::Concrete,
                source_function: "concrete::calculate_concrete_volume",
            },
            Formula::PremixBags => FormulaMetadata {
                name: "Premix Bags",
                description: "80 lb bags of premixed concrete for small pours",
                formula_plain: "bags = ceil(yd3 x 27 / 0.6)",
                variables: vec![Variable::new("yd3", "Total volume", "yd3")],
                group: FormulaGroup::Concrete,
                source_function: "concrete::premix_bags",
            },
            Formula::DrywallSheets => FormulaMetadata {
                name: "Drywall Sheets",
                description: "Whole sheets needed for a surface, including waste",
                formula_plain: "total = ceil(A / S + (A / S) x w)",
                variables: vec![
                    Variable::new("A", "Surface area", "ft2"),
                    Variable::new("S", "Sheet size", "ft2"),
                    Variable::new("w", "Waste factor", "fraction"),
                ],
                group: FormulaGroup::Drywall,
                source_function: "drywall::calculate_drywall_sheets",
            },
            Formula::PaintGallons => FormulaMetadata {
                name: "Paint Gallons",
                description: "Gallons of paint for an area and number of coats",
                formula_plain: "gal = A x coats / coverage",
                variables: vec![
                    Variable::new("A", "Paintable area", "ft2"),
                    Variable::new("coats", "Number of coats", "-"),
                    Variable::new("coverage", "Spread rate", "ft2/gal"),
                ],
                group: FormulaGroup::Paint,
                source_function: "paint::calculate_paint_coverage",
            },
            Formula::QuartRounding => FormulaMetadata {
                name: "Quart Rounding",
                description: "Round gallons up to the nearest quarter gallon",
                formula_plain: "rounded = ceil(gal x 4) / 4",
                variables: vec![Variable::new("gal", "Exact gallons", "gal")],
                group: FormulaGroup::Paint,
                source_function: "units::Gallons::round_up_to_quart",
            },
            Formula::InsulationBags => FormulaMetadata {
                name: "Insulation Bags",
                description: "Bags of batt insulation including waste",
                formula_plain: "bags = ceil(A x (1 + w) / coverage)",
                variables: vec![
                    Variable::new("A", "Insulated area", "ft2"),
                    Variable::new("w", "Waste factor", "fraction"),
                    Variable::new("coverage", "Coverage per bag", "ft2"),
                ],
                group: FormulaGroup::Insulation,
                source_function: "insulation::calculate_insulation_bags",
            },
            Formula::InsulationDepth => FormulaMetadata {
                name: "Insulation Depth",
                description: "Depth required to reach a target R-value",
                formula_plain: "d = R / (R per inch)",
                variables: vec![
                    Variable::new("R", "Target R-value", "h ft2 F/BTU"),
                    Variable::new("R per inch", "Resistance per inch of material", "1/in"),
                ],
                group: FormulaGroup::Insulation,
                source_function: "insulation::insulation_depth",
            },
            Formula::MaterialCost => FormulaMetadata {
                name: "Material Cost",
                description: "Material cost with contractor markup",
                formula_plain: "total = Q x P + (Q x P) x m",
                variables: vec![
                    Variable::new("Q", "Quantity", "units"),
                    Variable::new("P", "Unit price", "$"),
                    Variable::new("m", "Markup", "fraction"),
                ],
                group: FormulaGroup::Cost,
                source_function: "cost::calculate_material_cost",
            },
            Formula::LaborCost => FormulaMetadata {
                name: "Labor Cost",
                description: "Labor cost with payroll burden",
                formula_plain: "total = H x r + (H x r) x b",
                variables: vec![
                    Variable::new("H", "Labor hours", "h"),
                    Variable::new("r", "Hourly rate", "$/h"),
                    Variable::new("b", "Burden", "fraction"),
                ],
                group: FormulaGroup::Cost,
                source_function: "cost::calculate_labor_cost",
            },
            Formula::OverheadAndProfit => FormulaMetadata {
                name: "Overhead & Profit",
                description: "Overhead on the subtotal, then profit on subtotal plus overhead",
                formula_plain: "total = S + S x o + (S + S x o) x p",
                variables: vec![
                    Variable::new("S", "Material + labor subtotal", "$"),
                    Variable::new("o", "Overhead rate", "fraction"),
                    Variable::new("p", "Profit rate", "fraction"),
                ],
                group: FormulaGroup::Cost,
                source_function: "cost::calculate_overhead_and_profit",
            },
        }
    }

    /// Get all formulas in a given group
    pub fn in_group(group: FormulaGroup) -> Vec<Formula> {
        ALL_FORMULAS
            .iter()
            .filter(|f| f.metadata().group == group)
            .copied()
            .collect()
    }

    /// Get all groups in listing order
    pub fn all_groups() -> Vec<FormulaGroup> {
        use FormulaGroup::*;
        let mut groups = vec![Takeoff, Concrete, Drywall, Paint, Insulation, Cost];
        groups.sort_by_key(|g| g.sort_order());
        groups
    }
}

/// All formulas in the registry (for iteration)
pub static ALL_FORMULAS: &[Formula] = &[
    Formula::RoomWallArea,
    Formula::RoomCeilingArea,
    Formula::NetArea,
    Formula::SlabVolume,
    Formula::CubicYards,
    Formula::WasteAllowance,
    Formula::PremixBags,
    Formula::DrywallSheets,
    Formula::PaintGallons,
    Formula::QuartRounding,
    Formula::InsulationBags,
    Formula::InsulationDepth,
    Formula::MaterialCost,
    Formula::LaborCost,
    Formula::OverheadAndProfit,
];

/// Generate a markdown reference of every formula, grouped and ordered.
pub fn generate_formulas_markdown() -> String {
    let mut output = String::new();
    output.push_str("# Formula Reference\n\n");
    output.push_str("All results are rough order of magnitude (ROM) estimates.\n\n");

    for group in Formula::all_groups() {
        let formulas = Formula::in_group(group);
        if formulas.is_empty() {
            continue;
        }
        output.push_str(&format!("## {}\n\n", group.display_name()));

        for formula in formulas {
            let meta = formula.metadata();
            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("```text\n{}\n```\n\n", meta.formula_plain));
            output.push_str("| Symbol | Description | Units |\n|---|---|---|\n");
            for var in &meta.variables {
                output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
            }
            output.push_str(&format!("\nSource: `{}`\n\n", meta.source_function));
        }
    }

    output
}
