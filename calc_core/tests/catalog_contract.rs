//! Catalog-wide guarantees: every registry entry resolves to a module that
//! honors the calculator contract, and the cost chain composes the same way
//! in the formulas and in the calculators.

use calc_core::calculators::{EXPLAIN_PLACEHOLDER, ROM_DISCLAIMER};
use calc_core::engine::{CalculatorEngine, EngineState, FormData, Formatter, InputField, InputValues};
use calc_core::errors::NOT_IMPLEMENTED;
use calc_core::formulas::cost::{calculate_material_cost, calculate_project_cost, CostRates};
use calc_core::registry::{all_calculator_meta, get_calculator, CalculatorId, CalculatorStatus, REGISTRY};

const IMPLEMENTED: [CalculatorId; 5] = [
    CalculatorId::Concrete,
    CalculatorId::Drywall,
    CalculatorId::Paint,
    CalculatorId::Insulation,
    CalculatorId::Labor,
];

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// A value every required field accepts.
fn sample_value(field: &InputField) -> f64 {
    let low = field.min.unwrap_or(0.0);
    let value = low.max(10.0);
    field.max.map_or(value, |max| value.min(max))
}

fn sample_form(fields: &[InputField]) -> FormData {
    fields
        .iter()
        .filter(|f| f.required)
        .map(|f| (f.name, sample_value(f).to_string()))
        .collect()
}

#[test]
fn every_entry_reports_its_own_key() {
    for descriptor in REGISTRY {
        let module = descriptor.load();
        assert_eq!(module.meta().id, descriptor.id, "registry key {}", descriptor.id);
        assert!(!module.meta().title.is_empty());
        assert_eq!(get_calculator(descriptor.id.as_str()).unwrap().id, descriptor.id);
    }
}

#[test]
fn catalog_lists_everything_in_order() {
    let entries = all_calculator_meta();
    let ids: Vec<CalculatorId> = entries.iter().map(|e| e.id).collect();
    let registry_ids: Vec<CalculatorId> = REGISTRY.iter().map(|d| d.id).collect();
    assert_eq!(ids, registry_ids);
    assert!(entries.iter().all(|e| e.status != CalculatorStatus::Unavailable));

    let ready: Vec<CalculatorId> = entries
        .iter()
        .filter(|e| e.status == CalculatorStatus::Ready)
        .map(|e| e.id)
        .collect();
    assert_eq!(ready.len(), IMPLEMENTED.len());
    assert!(IMPLEMENTED.iter().all(|id| ready.contains(id)));
}

#[test]
fn placeholders_keep_the_placeholder_contract() {
    for descriptor in REGISTRY.iter().filter(|d| !IMPLEMENTED.contains(&d.id)) {
        let module = descriptor.load();
        assert!(!module.is_implemented(), "{}", descriptor.id);
        assert!(module.inputs().is_empty());
        assert!(module.outputs().is_empty());
        assert_eq!(module.explain(&InputValues::new()), EXPLAIN_PLACEHOLDER);

        let mut engine = CalculatorEngine::new(module, Formatter::default());
        match engine.calculate(&FormData::new()) {
            EngineState::Failed { message } => assert_eq!(message, NOT_IMPLEMENTED),
            other => panic!("{}: expected Failed, got {:?}", descriptor.id, other),
        }
    }
}

#[test]
fn implemented_modules_produce_every_declared_output() {
    for id in IMPLEMENTED {
        let module = id.module();
        assert!(module.is_implemented());
        assert!(!module.inputs().is_empty(), "{} declares no inputs", id);
        assert!(!module.outputs().is_empty(), "{} declares no outputs", id);

        let mut engine = CalculatorEngine::new(module, Formatter::default());
        let form = sample_form(module.inputs());
        match engine.calculate(&form) {
            EngineState::Computed { result, rows, .. } => {
                for output in module.outputs() {
                    let value = result.get(output.key);
                    assert!(value.is_some(), "{}: missing output '{}'", id, output.key);
                    assert!(value.is_some_and(f64::is_finite));
                }
                assert_eq!(rows.len(), module.outputs().len());
            }
            other => panic!("{}: expected Computed, got {:?}", id, other),
        }
    }
}

#[test]
fn implemented_modules_explain_their_work() {
    for id in IMPLEMENTED {
        let module = id.module();
        let inputs: InputValues = module
            .inputs()
            .iter()
            .filter(|f| f.required)
            .map(|f| (f.name, sample_value(f)))
            .collect();
        let text = module.explain(&inputs);
        assert!(text.ends_with(ROM_DISCLAIMER), "{}: {}", id, text);

        let partial = module.explain(&InputValues::new());
        assert!(partial.starts_with("Enter "), "{}: {}", id, partial);
    }
}

#[test]
fn every_default_is_within_its_own_bounds() {
    for descriptor in REGISTRY {
        for field in descriptor.load().inputs() {
            let Some(default) = field.default else { continue };
            let id = descriptor.id;
            assert!(default.is_finite(), "{}.{} default {}", id, field.name, default);
            if let Some(min) = field.min {
                assert!(default >= min, "{}.{} default {} below {}", id, field.name, default, min);
            }
            if let Some(max) = field.max {
                assert!(default <= max, "{}.{} default {} above {}", id, field.name, default, max);
            }
        }
    }
}

#[test]
fn out_of_range_input_never_reaches_compute() {
    let module = CalculatorId::Concrete.module();
    let mut engine = CalculatorEngine::new(module, Formatter::default());
    let form: FormData = [("length", "20"), ("width", "12"), ("thickness", "1")].into_iter().collect();
    match engine.calculate(&form) {
        EngineState::Invalid { errors } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field(), "thickness");
        }
        other => panic!("expected Invalid, got {:?}", other),
    }
}

#[test]
fn material_cost_example() {
    let material = calculate_material_cost(10.0, 100.0, 0.1);
    assert!(approx_eq(material.material_cost, 1000.0));
    assert!(approx_eq(material.markup_amount, 100.0));
    assert!(approx_eq(material.total_cost, 1100.0));
}

#[test]
fn concrete_total_matches_a_manual_cost_chain() {
    let module = CalculatorId::Concrete.module();
    let inputs: InputValues = [("length", 20.0), ("width", 12.0), ("thickness", 4.0)]
        .into_iter()
        .collect::<InputValues>()
        .with_defaults(module.inputs());
    let result = module.compute(&inputs).unwrap();

    let total_volume = result.get("total_volume").unwrap();
    assert!(approx_eq(total_volume, 20.0 * 12.0 * (4.0 / 12.0) / 27.0 * 1.2));

    let rates = CostRates {
        unit_price: 150.0,
        markup: 0.15,
        labor_hours: total_volume * 1.5,
        labor_rate: 45.0,
        burden: 0.35,
        overhead: 0.10,
        profit: 0.10,
    };
    let manual = calculate_project_cost(total_volume, &rates);

    assert!(approx_eq(result.get("material_cost").unwrap(), manual.material.total_cost));
    assert!(approx_eq(result.get("labor_cost").unwrap(), manual.labor.total_cost));
    assert!(approx_eq(result.get("subtotal").unwrap(), manual.subtotal));
    assert!(approx_eq(result.get("total_cost").unwrap(), manual.total));
    assert!(approx_eq(manual.total, manual.overhead_and_profit.total_cost));
}
