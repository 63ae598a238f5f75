//! Drywall calculator for a rectangular room: walls less openings, optional
//! ceiling, whole sheets with waste.

use crate::calculators::{
    explain_missing, CalculatorMeta, CalculatorModule, CostChain, Explanation, BURDEN_FIELD, LABOR_COST_OUTPUT,
    LABOR_RATE_FIELD, MARKUP_FIELD, MATERIAL_COST_OUTPUT, OVERHEAD_FIELD, OVERHEAD_OUTPUT, PROFIT_FIELD,
    PROFIT_OUTPUT, SUBTOTAL_OUTPUT, TOTAL_COST_OUTPUT,
};
use crate::engine::{ComputationResult, InputField, InputValues, OutputField, OutputFormat};
use crate::errors::{CalcError, CalcResult};
use crate::formulas::drywall::{
    calculate_drywall_sheets,
    net_area,
    room_ceiling_area,
    room_wall_area,
    DrywallSheets,
    DEFAULT_DRYWALL_WASTE,
    DEFAULT_SHEET_SIZE,
};
use crate::formulas::registry::Formula;
use crate::registry::{CalculatorCategory, CalculatorId};

pub const DEFAULT_WALL_HEIGHT: f64 = 8.0;
pub const DEFAULT_PRICE_PER_SHEET: f64 = 14.0;
/// Hang, tape and finish, per sheet
pub const DEFAULT_LABOR_HOURS_PER_SHEET: f64 = 0.5;

static INPUTS: &[InputField] = &[
    InputField::required("room_length", "Room length").unit("ft").min(1.0).max(500.0),
    InputField::required("room_width", "Room width").unit("ft").min(1.0).max(500.0),
    InputField::optional("wall_height", "Wall height", DEFAULT_WALL_HEIGHT).unit("ft").min(4.0).max(30.0),
    InputField::optional("openings_area", "Doors and windows", 0.0).unit("ft²").min(0.0).max(10_000.0),
    // 1 = yes, 0 = walls only
    InputField::optional("include_ceiling", "Include ceiling", 1.0).min(0.0).max(1.0),
    InputField::optional("sheet_size", "Sheet size", DEFAULT_SHEET_SIZE).unit("ft²").min(16.0).max(64.0),
    InputField::optional("waste_factor", "Waste factor", DEFAULT_DRYWALL_WASTE).min(0.0).max(0.5),
    InputField::optional("price_per_sheet", "Price per sheet", DEFAULT_PRICE_PER_SHEET)
        .unit("$")
        .min(0.0)
        .max(500.0),
    InputField::optional("labor_hours_per_sheet", "Labor hours per sheet", DEFAULT_LABOR_HOURS_PER_SHEET)
        .unit("h")
        .min(0.0)
        .max(8.0),
    MARKUP_FIELD,
    LABOR_RATE_FIELD,
    BURDEN_FIELD,
    OVERHEAD_FIELD,
    PROFIT_FIELD,
];

static OUTPUTS: &[OutputField] = &[
    OutputField::new("wall_area", "Net wall area", OutputFormat::unit("ft²").decimals(1)),
    OutputField::new("ceiling_area", "Ceiling area", OutputFormat::unit("ft²").decimals(1)),
    OutputField::new("total_sheets", "Sheets (with waste)", OutputFormat::number().decimals(0)),
    MATERIAL_COST_OUTPUT,
    LABOR_COST_OUTPUT,
    SUBTOTAL_OUTPUT,
    OVERHEAD_OUTPUT,
    PROFIT_OUTPUT,
    TOTAL_COST_OUTPUT,
];

struct Takeoff {
    gross_wall: f64,
    net_wall: f64,
    ceiling: f64,
    sheets: DrywallSheets,
}

/// Walls and ceiling of one room.
#[derive(Debug, Default, Clone, Copy)]
pub struct DrywallCalculator;

impl DrywallCalculator {
    fn takeoff(inputs: &InputValues) -> CalcResult<Takeoff> {
        let length = inputs.require("room_length")?;
        let width = inputs.require("room_width")?;
        let gross_wall = room_wall_area(length, width, inputs.require("wall_height")?);
        let openings = inputs.require("openings_area")?;
        if openings > gross_wall {
            return Err(CalcError::calculation_failed(
                "drywall",
                format!(
                    "Doors and windows ({} ft²) exceed the wall area ({} ft²)",
                    openings, gross_wall
                ),
            ));
        }
        let net_wall = net_area(gross_wall, openings);
        let ceiling = if inputs.require("include_ceiling")? >= 0.5 {
            room_ceiling_area(length, width)
        } else {
            0.0
        };
        let sheets = calculate_drywall_sheets(
            net_wall + ceiling,
            inputs.require("sheet_size")?,
            inputs.require("waste_factor")?,
        );
        Ok(Takeoff {
            gross_wall,
            net_wall,
            ceiling,
            sheets,
        })
    }

    fn run(inputs: &InputValues) -> CalcResult<(Takeoff, CostChain)> {
        let takeoff = Self::takeoff(inputs)?;
        let total = takeoff.sheets.total_sheets;
        let chain = CostChain::run(
            inputs,
            total,
            inputs.require("price_per_sheet")?,
            total * inputs.require("labor_hours_per_sheet")?,
        )?;
        Ok((takeoff, chain))
    }
}

impl CalculatorModule for DrywallCalculator {
    fn meta(&self) -> CalculatorMeta {
        CalculatorMeta {
            id: CalculatorId::Drywall,
            title: "Drywall Calculator",
            category: CalculatorCategory::Interior,
        }
    }

    fn inputs(&self) -> &'static [InputField] {
        INPUTS
    }

    fn outputs(&self) -> &'static [OutputField] {
        OUTPUTS
    }

    fn compute(&self, inputs: &InputValues) -> CalcResult<ComputationResult> {
        let (t, chain) = Self::run(inputs)?;
        let result = ComputationResult::new()
            .with("wall_area", t.net_wall)
            .with("ceiling_area", t.ceiling)
            .with("total_sheets", t.sheets.total_sheets)
            .with_detail("gross_wall_area", t.gross_wall)
            .with_detail("sheets_needed", t.sheets.sheets_needed)
            .with_detail("waste_sheets", t.sheets.waste_sheets);
        Ok(chain.apply(result))
    }

    fn explain(&self, inputs: &InputValues) -> String {
        if let Some(missing) = explain_missing(INPUTS, inputs) {
            return missing;
        }
        let inputs = inputs.with_defaults(INPUTS);
        let (t, chain) = match Self::run(&inputs) {
            Ok(run) => run,
            Err(e) => return e.user_message(),
        };
        let length = inputs.get("room_length").unwrap_or_default();
        let width = inputs.get("room_width").unwrap_or_default();
        let height = inputs.get("wall_height").unwrap_or_default();
        let openings = inputs.get("openings_area").unwrap_or_default();
        let sheet_size = inputs.get("sheet_size").unwrap_or_default();
        let waste = inputs.get("waste_factor").unwrap_or_default();

        let mut explanation = Explanation::new("Drywall")
            .step(
                Formula::RoomWallArea,
                format!("2 x ({} + {}) x {} = {:.1} ft2", length, width, height, t.gross_wall),
            )
            .step(
                Formula::NetArea,
                format!("{:.1} - {} = {:.1} ft2", t.gross_wall, openings, t.net_wall),
            );
        if t.ceiling > 0.0 {
            explanation = explanation.step(
                Formula::RoomCeilingArea,
                format!("{} x {} = {:.1} ft2", length, width, t.ceiling),
            );
        }
        explanation
            .step(
                Formula::DrywallSheets,
                format!(
                    "ceil({:.1} / {} + {:.2} x {}) = {} sheets",
                    t.net_wall + t.ceiling,
                    sheet_size,
                    t.sheets.sheets_needed,
                    waste,
                    t.sheets.total_sheets
                ),
            )
            .cost(&chain)
            .finish()
    }
}
