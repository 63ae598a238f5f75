//! Property tests for the formulas and the engine.

use calc_core::engine::{read_form, CalculatorEngine, EngineState, FormData, Formatter, InputField, InputValues};
use calc_core::formulas::concrete::calculate_concrete_volume;
use calc_core::formulas::cost::{calculate_project_cost, CostRates};
use calc_core::formulas::drywall::calculate_drywall_sheets;
use calc_core::formulas::paint::calculate_paint_coverage;
use calc_core::registry::CalculatorId;
use proptest::prelude::*;

const IMPLEMENTED: [CalculatorId; 5] = [
    CalculatorId::Concrete,
    CalculatorId::Drywall,
    CalculatorId::Paint,
    CalculatorId::Insulation,
    CalculatorId::Labor,
];

/// Required fields placed `scale` of the way through their range (capped
/// at 1000), optional fields at their defaults.
fn scaled_inputs(fields: &[InputField], scale: f64) -> InputValues {
    fields
        .iter()
        .filter(|f| f.required)
        .map(|f| {
            let min = f.min.unwrap_or(0.0);
            let max = f.max.unwrap_or(1000.0).min(1000.0);
            (f.name, min + (max - min) * scale)
        })
        .collect::<InputValues>()
        .with_defaults(fields)
}

fn rates_strategy() -> impl Strategy<Value = CostRates> {
    (
        0.0..500.0f64,
        0.0..1.0f64,
        0.0..200.0f64,
        0.0..150.0f64,
        0.0..1.0f64,
        0.0..0.5f64,
        0.0..0.5f64,
    )
        .prop_map(
            |(unit_price, markup, labor_hours, labor_rate, burden, overhead, profit)| CostRates {
                unit_price,
                markup,
                labor_hours,
                labor_rate,
                burden,
                overhead,
                profit,
            },
        )
}

proptest! {
    /// Same inputs, same outputs, for every working calculator
    #[test]
    fn compute_is_deterministic(scale in 0.0..1.0f64) {
        for id in IMPLEMENTED {
            let module = id.module();
            let inputs = scaled_inputs(module.inputs(), scale);
            prop_assert_eq!(module.compute(&inputs), module.compute(&inputs), "{}", id);
        }
    }

    /// More waste always orders more concrete
    #[test]
    fn concrete_volume_grows_with_waste(
        length in 1.0..200.0f64,
        width in 1.0..200.0f64,
        thickness in 2.0..48.0f64,
        low in 0.0..0.5f64,
        extra in 0.01..0.5f64,
    ) {
        let a = calculate_concrete_volume(length, width, thickness, low);
        let b = calculate_concrete_volume(length, width, thickness, low + extra);
        prop_assert!(b.total_volume > a.total_volume);
        prop_assert!(a.total_volume >= a.cubic_yards);
    }

    /// More waste never buys fewer sheets, and sheets are whole
    #[test]
    fn drywall_sheets_grow_with_waste(
        area in 1.0..10_000.0f64,
        low in 0.0..0.5f64,
        extra in 0.0..0.5f64,
    ) {
        let a = calculate_drywall_sheets(area, 32.0, low);
        let b = calculate_drywall_sheets(area, 32.0, low + extra);
        prop_assert!(b.total_sheets >= a.total_sheets);
        prop_assert_eq!(a.total_sheets.fract(), 0.0);
    }

    /// Rounded gallons cover the need and stay within one quart of it
    #[test]
    fn paint_rounds_up_to_quarts(area in 1.0..20_000.0f64, coats in 1.0..4.0f64) {
        let paint = calculate_paint_coverage(area, coats, 350.0);
        prop_assert!(paint.gallons_rounded >= paint.gallons);
        prop_assert!(paint.gallons_rounded - paint.gallons < 0.25 + 1e-9);
        prop_assert_eq!((paint.gallons_rounded * 4.0).fract(), 0.0);
    }

    /// With non-negative rates each step of the chain adds to the last
    #[test]
    fn cost_chain_is_monotone(quantity in 0.0..1_000.0f64, rates in rates_strategy()) {
        let cost = calculate_project_cost(quantity, &rates);
        prop_assert!(cost.material.total_cost >= cost.material.material_cost);
        prop_assert!(cost.labor.total_cost >= cost.labor.labor_cost);
        prop_assert!(cost.total >= cost.subtotal);
        prop_assert!(cost.subtotal >= 0.0);
    }

    /// Validation of one field does not depend on the other fields
    #[test]
    fn field_errors_are_independent(area in "[a-z]{1,6}", coats in 1.0..4.0f64) {
        let fields = CalculatorId::Paint.module().inputs();

        let alone: FormData = [("area", area.clone())].into_iter().collect();
        let with_coats: FormData = [("area", area), ("coats", coats.to_string())].into_iter().collect();

        let a = read_form(fields, &alone).unwrap_err();
        let b = read_form(fields, &with_coats).unwrap_err();
        prop_assert_eq!(a, b);
    }

    /// Unknown form entries never change the outcome
    #[test]
    fn undeclared_entries_are_ignored(area in 1.0..10_000.0f64, junk in "[a-z]{1,8}") {
        let module = CalculatorId::Paint.module();
        let plain: FormData = [("area", area.to_string())].into_iter().collect();
        let noisy: FormData = [("area", area.to_string()), ("x_unknown", junk)].into_iter().collect();

        let mut engine = CalculatorEngine::new(module, Formatter::default());
        let first = match engine.calculate(&plain) {
            EngineState::Computed { result, .. } => result.clone(),
            other => return Err(TestCaseError::fail(format!("expected Computed, got {:?}", other))),
        };
        let second = match engine.calculate(&noisy) {
            EngineState::Computed { result, .. } => result.clone(),
            other => return Err(TestCaseError::fail(format!("expected Computed, got {:?}", other))),
        };
        prop_assert_eq!(first, second);
    }
}
