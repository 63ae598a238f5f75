//! Paint calculator. Gallons are bought by the quart, so cost uses the
//! rounded quantity.

use crate::calculators::{
    explain_missing, CalculatorMeta, CalculatorModule, CostChain, Explanation, BURDEN_FIELD, LABOR_COST_OUTPUT,
    LABOR_RATE_FIELD, MARKUP_FIELD, MATERIAL_COST_OUTPUT, OVERHEAD_FIELD, OVERHEAD_OUTPUT, PROFIT_FIELD,
    PROFIT_OUTPUT, SUBTOTAL_OUTPUT, TOTAL_COST_OUTPUT,
};
use crate::engine::{ComputationResult, InputField, InputValues, OutputField, OutputFormat};
use crate::errors::CalcResult;
use crate::formulas::paint::{calculate_paint_coverage, PaintCoverage, DEFAULT_COATS, DEFAULT_COVERAGE_SQFT_PER_GAL};
use crate::formulas::registry::Formula;
use crate::registry::{CalculatorCategory, CalculatorId};

pub const DEFAULT_PRICE_PER_GALLON: f64 = 40.0;
/// Square feet one painter covers per hour, per coat
pub const DEFAULT_SQFT_PER_LABOR_HOUR: f64 = 150.0;

static INPUTS: &[InputField] = &[
    InputField::required("area", "Paintable area").unit("ft²").min(1.0).max(100_000.0),
    InputField::optional("coats", "Coats", DEFAULT_COATS).min(1.0).max(5.0),
    InputField::optional("coverage", "Coverage", DEFAULT_COVERAGE_SQFT_PER_GAL)
        .unit("ft²/gal")
        .min(50.0)
        .max(1000.0),
    InputField::optional("price_per_gallon", "Price per gallon", DEFAULT_PRICE_PER_GALLON)
        .unit("$")
        .min(0.0)
        .max(1000.0),
    InputField::optional("sqft_per_labor_hour", "Production rate", DEFAULT_SQFT_PER_LABOR_HOUR)
        .unit("ft²/h")
        .min(10.0)
        .max(1000.0),
    MARKUP_FIELD,
    LABOR_RATE_FIELD,
    BURDEN_FIELD,
    OVERHEAD_FIELD,
    PROFIT_FIELD,
];

static OUTPUTS: &[OutputField] = &[
    OutputField::new("gallons", "Paint needed", OutputFormat::unit("gal")),
    OutputField::new("gallons_rounded", "Paint to buy", OutputFormat::unit("gal")),
    MATERIAL_COST_OUTPUT,
    LABOR_COST_OUTPUT,
    SUBTOTAL_OUTPUT,
    OVERHEAD_OUTPUT,
    PROFIT_OUTPUT,
    TOTAL_COST_OUTPUT,
];

#[derive(Debug, Default, Clone, Copy)]
pub struct PaintCalculator;

impl PaintCalculator {
    fn run(inputs: &InputValues) -> CalcResult<(PaintCoverage, CostChain)> {
        let area = inputs.require("area")?;
        let coats = inputs.require("coats")?;
        let paint = calculate_paint_coverage(area, coats, inputs.require("coverage")?);
        let labor_hours = area * coats / inputs.require("sqft_per_labor_hour")?;
        let chain = CostChain::run(
            inputs,
            paint.gallons_rounded,
            inputs.require("price_per_gallon")?,
            labor_hours,
        )?;
        Ok((paint, chain))
    }
}

impl CalculatorModule for PaintCalculator {
    fn meta(&self) -> CalculatorMeta {
        CalculatorMeta {
            id: CalculatorId::Paint,
            title: "Paint Calculator",
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
        let (paint, chain) = Self::run(inputs)?;
        let result = ComputationResult::new()
            .with("gallons", paint.gallons)
            .with("gallons_rounded", paint.gallons_rounded);
        Ok(chain.apply(result))
    }

    fn explain(&self, inputs: &InputValues) -> String {
        if let Some(missing) = explain_missing(INPUTS, inputs) {
            return missing;
        }
        let inputs = inputs.with_defaults(INPUTS);
        let (paint, chain) = match Self::run(&inputs) {
            Ok(run) => run,
            Err(e) => return e.user_message(),
        };
        Explanation::new("Paint")
            .step(
                Formula::PaintGallons,
                format!(
                    "{} x {} / {} = {:.2} gal",
                    inputs.get("area").unwrap_or_default(),
                    inputs.get("coats").unwrap_or_default(),
                    inputs.get("coverage").unwrap_or_default(),
                    paint.gallons
                ),
            )
            .step(
                Formula::QuartRounding,
                format!("ceil({:.2} x 4) / 4 = {} gal", paint.gallons, paint.gallons_rounded),
            )
            .cost(&chain)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walls(area: f64) -> InputValues {
        [("area", area)].into_iter().collect::<InputValues>().with_defaults(INPUTS)
    }

    #[test]
    fn test_reference_paint() {
        let result = PaintCalculator.compute(&walls(600.0)).unwrap();
        assert!((result.get("gallons").unwrap() - 3.43).abs() < 0.01);
        assert_eq!(result.get("gallons_rounded"), Some(3.5));
    }

    #[test]
    fn test_material_uses_rounded_gallons() {
        // 3.5 gal x 40 x 1.15 = 161.00
        let result = PaintCalculator.compute(&walls(600.0)).unwrap();
        assert!((result.get("material_cost").unwrap() - 161.0).abs() < 1e-9);
        // 1200 ft2 of coats / 150 = 8 h
        assert_eq!(result.detail("labor_hours"), Some(8.0));
    }

    #[test]
    fn test_explain_mentions_rounding() {
        let text = PaintCalculator.explain(&walls(600.0));
        assert!(text.contains("ceil(3.43 x 4) / 4 = 3.5 gal"));
        assert_eq!(PaintCalculator.explain(&InputValues::new()), "Enter Paintable area to see the calculation.");
    }
}
