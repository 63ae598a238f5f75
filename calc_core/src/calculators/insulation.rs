//! Batt insulation calculator: depth for a target R-value and bag count.

use crate::calculators::{
    explain_missing, CalculatorMeta, CalculatorModule, CostChain, Explanation, BURDEN_FIELD, LABOR_COST_OUTPUT,
    LABOR_RATE_FIELD, MARKUP_FIELD, MATERIAL_COST_OUTPUT, OVERHEAD_FIELD, OVERHEAD_OUTPUT, PROFIT_FIELD,
    PROFIT_OUTPUT, SUBTOTAL_OUTPUT, TOTAL_COST_OUTPUT,
};
use crate::engine::{ComputationResult, InputField, InputValues, OutputField, OutputFormat};
use crate::errors::CalcResult;
use crate::formulas::insulation::{
    calculate_insulation_bags,
    insulation_depth,
    InsulationBags,
    DEFAULT_BAG_COVERAGE_SQFT,
    DEFAULT_INSULATION_WASTE,
    DEFAULT_R_PER_INCH,
};
use crate::formulas::registry::Formula;
use crate::registry::{CalculatorCategory, CalculatorId};

pub const DEFAULT_TARGET_R: f64 = 30.0;
pub const DEFAULT_PRICE_PER_BAG: f64 = 50.0;
pub const DEFAULT_SQFT_PER_LABOR_HOUR: f64 = 200.0;

static INPUTS: &[InputField] = &[
    InputField::required("area", "Area").unit("ft²").min(1.0).max(100_000.0),
    InputField::optional("target_r", "Target R-value", DEFAULT_TARGET_R).min(1.0).max(60.0),
    InputField::optional("r_per_inch", "R-value per inch", DEFAULT_R_PER_INCH).min(1.0).max(8.0),
    InputField::optional("bag_coverage", "Coverage per bag", DEFAULT_BAG_COVERAGE_SQFT)
        .unit("ft²")
        .min(1.0)
        .max(500.0),
    InputField::optional("waste_factor", "Waste factor", DEFAULT_INSULATION_WASTE).min(0.0).max(0.5),
    InputField::optional("price_per_bag", "Price per bag", DEFAULT_PRICE_PER_BAG)
        .unit("$")
        .min(0.0)
        .max(1000.0),
    InputField::optional("sqft_per_labor_hour", "Production rate", DEFAULT_SQFT_PER_LABOR_HOUR)
        .unit("ft²/h")
        .min(10.0)
        .max(2000.0),
    MARKUP_FIELD,
    LABOR_RATE_FIELD,
    BURDEN_FIELD,
    OVERHEAD_FIELD,
    PROFIT_FIELD,
];

static OUTPUTS: &[OutputField] = &[
    OutputField::new("depth", "Depth for target R", OutputFormat::unit("in").decimals(1)),
    OutputField::new("total_bags", "Bags (with waste)", OutputFormat::number().decimals(0)),
    MATERIAL_COST_OUTPUT,
    LABOR_COST_OUTPUT,
    SUBTOTAL_OUTPUT,
    OVERHEAD_OUTPUT,
    PROFIT_OUTPUT,
    TOTAL_COST_OUTPUT,
];

#[derive(Debug, Default, Clone, Copy)]
pub struct InsulationCalculator;

impl InsulationCalculator {
    fn run(inputs: &InputValues) -> CalcResult<(f64, InsulationBags, CostChain)> {
        let area = inputs.require("area")?;
        let depth = insulation_depth(inputs.require("target_r")?, inputs.require("r_per_inch")?);
        let bags = calculate_insulation_bags(area, inputs.require("bag_coverage")?, inputs.require("waste_factor")?);
        let chain = CostChain::run(
            inputs,
            bags.total_bags,
            inputs.require("price_per_bag")?,
            area / inputs.require("sqft_per_labor_hour")?,
        )?;
        Ok((depth, bags, chain))
    }
}

impl CalculatorModule for InsulationCalculator {
    fn meta(&self) -> CalculatorMeta {
        CalculatorMeta {
            id: CalculatorId::Insulation,
            title: "Insulation Calculator",
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
        let (depth, bags, chain) = Self::run(inputs)?;
        let result = ComputationResult::new()
            .with("depth", depth)
            .with("total_bags", bags.total_bags)
            .with_detail("adjusted_area", bags.adjusted_area)
            .with_detail("bags_needed", bags.bags_needed);
        Ok(chain.apply(result))
    }

    fn explain(&self, inputs: &InputValues) -> String {
        if let Some(missing) = explain_missing(INPUTS, inputs) {
            return missing;
        }
        let inputs = inputs.with_defaults(INPUTS);
        let (depth, bags, chain) = match Self::run(&inputs) {
            Ok(run) => run,
            Err(e) => return e.user_message(),
        };
        Explanation::new("Insulation")
            .step(
                Formula::InsulationDepth,
                format!(
                    "{} / {} = {:.1} in",
                    inputs.get("target_r").unwrap_or_default(),
                    inputs.get("r_per_inch").unwrap_or_default(),
                    depth
                ),
            )
            .step(
                Formula::InsulationBags,
                format!(
                    "ceil({:.1} / {}) = {} bags",
                    bags.adjusted_area,
                    inputs.get("bag_coverage").unwrap_or_default(),
                    bags.total_bags
                ),
            )
            .cost(&chain)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attic(area: f64) -> InputValues {
        [("area", area)].into_iter().collect::<InputValues>().with_defaults(INPUTS)
    }

    #[test]
    fn test_default_attic() {
        // R-30 at 3.2 per inch = 9.375 in; 1000 x 1.05 / 40 = 26.25 -> 27 bags
        let result = InsulationCalculator.compute(&attic(1000.0)).unwrap();
        assert_eq!(result.get("depth"), Some(9.375));
        assert_eq!(result.get("total_bags"), Some(27.0));
        assert_eq!(result.detail("labor_hours"), Some(5.0));
    }

    #[test]
    fn test_bag_cost() {
        // 27 x 50 x 1.15 = 1552.50
        let result = InsulationCalculator.compute(&attic(1000.0)).unwrap();
        assert!((result.get("material_cost").unwrap() - 1552.5).abs() < 1e-9);
    }

    #[test]
    fn test_explain() {
        let text = InsulationCalculator.explain(&attic(1000.0));
        assert!(text.contains("30 / 3.2 = 9.4 in"));
        assert!(text.contains("= 27 bags"));
    }
}
