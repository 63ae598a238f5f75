//! Concrete slab calculator: volume with waste, premix bags, and cost per
//! cubic yard of ready-mix.

use crate::calculators::{
    explain_missing, CalculatorMeta, CalculatorModule, CostChain, Explanation, BURDEN_FIELD, LABOR_COST_OUTPUT,
    LABOR_RATE_FIELD, MARKUP_FIELD, MATERIAL_COST_OUTPUT, OVERHEAD_FIELD, OVERHEAD_OUTPUT, PROFIT_FIELD,
    PROFIT_OUTPUT, SUBTOTAL_OUTPUT, TOTAL_COST_OUTPUT,
};
use crate::engine::{ComputationResult, InputField, InputValues, OutputField, OutputFormat};
use crate::errors::CalcResult;
use crate::formulas::concrete::{
    calculate_concrete_volume,
    premix_bags,
    ConcreteVolume,
    BAG_80LB_YIELD_CUFT,
    DEFAULT_CONCRETE_WASTE,
};
use crate::formulas::registry::Formula;
use crate::registry::{CalculatorCategory, CalculatorId};

/// Ready-mix price per cubic yard
pub const DEFAULT_PRICE_PER_YARD: f64 = 150.0;

/// Place-and-finish crew hours per cubic yard
pub const DEFAULT_LABOR_HOURS_PER_YARD: f64 = 1.5;

static INPUTS: &[InputField] = &[
    InputField::required("length", "Length").unit("ft").min(1.0).max(1000.0),
    InputField::required("width", "Width").unit("ft").min(1.0).max(1000.0),
    InputField::required("thickness", "Thickness").unit("in").min(2.0).max(48.0),
    InputField::optional("waste_factor", "Waste factor", DEFAULT_CONCRETE_WASTE).min(0.0).max(0.5),
    InputField::optional("price_per_yard", "Price per cubic yard", DEFAULT_PRICE_PER_YARD)
        .unit("$/yd³")
        .min(0.0)
        .max(10_000.0),
    InputField::optional("labor_hours_per_yard", "Labor hours per cubic yard", DEFAULT_LABOR_HOURS_PER_YARD)
        .unit("h/yd³")
        .min(0.0)
        .max(24.0),
    MARKUP_FIELD,
    LABOR_RATE_FIELD,
    BURDEN_FIELD,
    OVERHEAD_FIELD,
    PROFIT_FIELD,
];

static OUTPUTS: &[OutputField] = &[
    OutputField::new("cubic_yards", "Net volume", OutputFormat::unit("yd³")),
    OutputField::new("total_volume", "Order volume (with waste)", OutputFormat::unit("yd³")),
    OutputField::new("premix_bags", "80 lb premix bags", OutputFormat::number().decimals(0)),
    MATERIAL_COST_OUTPUT,
    LABOR_COST_OUTPUT,
    SUBTOTAL_OUTPUT,
    OVERHEAD_OUTPUT,
    PROFIT_OUTPUT,
    TOTAL_COST_OUTPUT,
];

/// Rectangular slab on grade.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConcreteCalculator;

impl ConcreteCalculator {
    fn run(inputs: &InputValues) -> CalcResult<(ConcreteVolume, CostChain)> {
        let volume = calculate_concrete_volume(
            inputs.require("length")?,
            inputs.require("width")?,
            inputs.require("thickness")?,
            inputs.require("waste_factor")?,
        );
        let labor_hours = volume.total_volume * inputs.require("labor_hours_per_yard")?;
        let chain = CostChain::run(inputs, volume.total_volume, inputs.require("price_per_yard")?, labor_hours)?;
        Ok((volume, chain))
    }
}

impl CalculatorModule for ConcreteCalculator {
    fn meta(&self) -> CalculatorMeta {
        CalculatorMeta {
            id: CalculatorId::Concrete,
            title: "Concrete Slab Calculator",
            category: CalculatorCategory::Masonry,
        }
    }

    fn inputs(&self) -> &'static [InputField] {
        INPUTS
    }

    fn outputs(&self) -> &'static [OutputField] {
        OUTPUTS
    }

    fn compute(&self, inputs: &InputValues) -> CalcResult<ComputationResult> {
        let (volume, chain) = Self::run(inputs)?;
        let result = ComputationResult::new()
            .with("cubic_yards", volume.cubic_yards)
            .with("total_volume", volume.total_volume)
            .with("premix_bags", premix_bags(volume.total_volume, BAG_80LB_YIELD_CUFT))
            .with_detail("cubic_feet", volume.cubic_feet)
            .with_detail("waste_amount", volume.waste_amount);
        Ok(chain.apply(result))
    }

    fn explain(&self, inputs: &InputValues) -> String {
        if let Some(missing) = explain_missing(INPUTS, inputs) {
            return missing;
        }
        let inputs = inputs.with_defaults(INPUTS);
        let (v, chain) = match Self::run(&inputs) {
            Ok(run) => run,
            Err(e) => return e.user_message(),
        };
        let length = inputs.get("length").unwrap_or_default();
        let width = inputs.get("width").unwrap_or_default();
        let thickness = inputs.get("thickness").unwrap_or_default();
        let waste = inputs.get("waste_factor").unwrap_or_default();

        Explanation::new("Concrete slab")
            .step(
                Formula::SlabVolume,
                format!("{} x {} x ({} / 12) = {:.2} ft3", length, width, thickness, v.cubic_feet),
            )
            .step(Formula::CubicYards, format!("{:.2} / 27 = {:.2} yd3", v.cubic_feet, v.cubic_yards))
            .step(
                Formula::WasteAllowance,
                format!("{:.2} + {:.2} x {} = {:.2} yd3", v.cubic_yards, v.cubic_yards, waste, v.total_volume),
            )
            .step(
                Formula::PremixBags,
                format!("{} bags (small pours only)", premix_bags(v.total_volume, BAG_80LB_YIELD_CUFT)),
            )
            .cost(&chain)
            .finish()
    }
}
