//! Labor and markup calculator: price crew hours (plus any already-priced
//! material) through burden, overhead and profit.

use crate::calculators::{
    explain_missing, CalculatorMeta, CalculatorModule, CostChain, Explanation, BURDEN_FIELD, LABOR_COST_OUTPUT,
    LABOR_RATE_FIELD, MARKUP_FIELD, MATERIAL_COST_OUTPUT, OVERHEAD_FIELD, OVERHEAD_OUTPUT, PROFIT_FIELD,
    PROFIT_OUTPUT, SUBTOTAL_OUTPUT, TOTAL_COST_OUTPUT,
};
use crate::engine::{ComputationResult, InputField, InputValues, OutputField, OutputFormat};
use crate::errors::{CalcError, CalcResult};
use crate::registry::{CalculatorCategory, CalculatorId};

static INPUTS: &[InputField] = &[
    InputField::required("hours", "Labor hours").unit("h").min(0.5).max(100_000.0),
    LABOR_RATE_FIELD,
    InputField::optional("material_cost", "Material cost", 0.0)
        .unit("$")
        .min(0.0)
        .max(10_000_000.0),
    MARKUP_FIELD,
    BURDEN_FIELD,
    OVERHEAD_FIELD,
    PROFIT_FIELD,
];

static OUTPUTS: &[OutputField] = &[
    LABOR_COST_OUTPUT,
    MATERIAL_COST_OUTPUT,
    SUBTOTAL_OUTPUT,
    OVERHEAD_OUTPUT,
    PROFIT_OUTPUT,
    TOTAL_COST_OUTPUT,
    OutputField::new("effective_markup", "Markup over direct cost", OutputFormat::percentage()),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct LaborCalculator;

impl LaborCalculator {
    /// Direct cost and the priced chain. Material is entered as a lump sum.
    fn run(inputs: &InputValues) -> CalcResult<(f64, CostChain)> {
        let hours = inputs.require("hours")?;
        let material = inputs.require("material_cost")?;
        let chain = CostChain::run(inputs, 1.0, material, hours)?;
        let direct = material + hours * chain.rates.labor_rate;
        if direct <= 0.0 {
            return Err(CalcError::calculation_failed(
                "labor",
                "Enter a labor rate or material cost to price",
            ));
        }
        Ok((direct, chain))
    }
}

impl CalculatorModule for LaborCalculator {
    fn meta(&self) -> CalculatorMeta {
        CalculatorMeta {
            id: CalculatorId::Labor,
            title: "Labor & Markup Calculator",
            category: CalculatorCategory::Costs,
        }
    }

    fn inputs(&self) -> &'static [InputField] {
        INPUTS
    }

    fn outputs(&self) -> &'static [OutputField] {
        OUTPUTS
    }

    fn compute(&self, inputs: &InputValues) -> CalcResult<ComputationResult> {
        let (direct, chain) = Self::run(inputs)?;
        let result = ComputationResult::new()
            .with("effective_markup", chain.breakdown.total / direct - 1.0)
            .with_detail("direct_cost", direct);
        Ok(chain.apply(result))
    }

    fn explain(&self, inputs: &InputValues) -> String {
        if let Some(missing) = explain_missing(INPUTS, inputs) {
            return missing;
        }
        let inputs = inputs.with_defaults(INPUTS);
        match Self::run(&inputs) {
            Ok((direct, chain)) => Explanation::new("Labor & markup")
                .note(format!("Direct cost: {:.2}", direct))
                .cost(&chain)
                .finish(),
            Err(e) => e.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(pairs: &[(&str, f64)]) -> InputValues {
        pairs.iter().copied().collect::<InputValues>().with_defaults(INPUTS)
    }

    #[test]
    fn test_labor_only() {
        // 10 h x 45 = 450, burden 157.50 -> 607.50
        // OH 60.75, profit 66.825 -> 735.075
        let result = LaborCalculator.compute(&job(&[("hours", 10.0)])).unwrap();
        assert!((result.get("labor_cost").unwrap() - 607.5).abs() < 1e-9);
        assert_eq!(result.get("material_cost"), Some(0.0));
        assert!((result.get("total_cost").unwrap() - 735.075).abs() < 1e-9);
        // 735.075 / 450 - 1
        assert!((result.get("effective_markup").unwrap() - 0.6335).abs() < 1e-9);
    }

    #[test]
    fn test_material_lump_sum_gets_markup() {
        let result = LaborCalculator
            .compute(&job(&[("hours", 10.0), ("material_cost", 1000.0)]))
            .unwrap();
        assert!((result.get("material_cost").unwrap() - 1150.0).abs() < 1e-9);
    }

    #[test]
    fn test_nothing_to_price() {
        let err = LaborCalculator
            .compute(&job(&[("hours", 10.0), ("labor_rate", 0.0)]))
            .unwrap_err();
        assert!(err.is_computation_failure());
    }
}
