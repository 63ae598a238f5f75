//! # Calculator Modules
//!
//! One module per trade. Each declares its form fields and result rows,
//! and composes functions from [`crate::formulas`] in `compute`. Modules
//! never validate input themselves; the [engine](crate::engine) only calls
//! `compute` once every declared field has passed.
//!
//! ## Implemented
//!
//! - [`concrete`] - Slab volume, premix bags, cost
//! - [`drywall`] - Room walls and ceiling, sheets, cost
//! - [`paint`] - Gallons by coverage, cost
//! - [`insulation`] - Bags and depth for a target R-value, cost
//! - [`labor`] - Crew hours through burden, overhead and profit
//!
//! The remaining trades are served by [`placeholder`] until they have
//! formulas of their own.
//!
//! ## Cost chain
//!
//! Every implemented trade finishes with the same chain: material (with
//! markup), labor (with burden), then overhead and profit on the subtotal.
//! The shared rate fields and result rows live in this module.

pub mod concrete;
pub mod drywall;
pub mod insulation;
pub mod labor;
pub mod paint;
pub mod placeholder;

use std::fmt::Write as _;

use serde::Serialize;

use crate::engine::{ComputationResult, Container, InputField, InputValues, OutputField, OutputFormat};
use crate::errors::CalcResult;
use crate::formulas::cost::{
    calculate_project_cost,
    CostBreakdown,
    CostRates,
    DEFAULT_LABOR_BURDEN,
    DEFAULT_MATERIAL_MARKUP,
    DEFAULT_OVERHEAD,
    DEFAULT_PROFIT,
};
use crate::formulas::registry::Formula;
use crate::registry::{CalculatorCategory, CalculatorId};

pub use concrete::ConcreteCalculator;
pub use drywall::DrywallCalculator;
pub use insulation::InsulationCalculator;
pub use labor::LaborCalculator;
pub use paint::PaintCalculator;
pub use placeholder::PlaceholderCalculator;

/// Shown with every result. Estimates are rough order of magnitude only.
pub const ROM_DISCLAIMER: &str =
    "Rough order of magnitude (ROM) estimate. Not a quote; verify quantities and prices locally.";

/// Returned by `explain` for trades without formulas yet
pub const EXPLAIN_PLACEHOLDER: &str = "TBD";

/// Identity of a calculator module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalculatorMeta {
    /// Must equal the registry key the module is loaded under
    pub id: CalculatorId,
    pub title: &'static str,
    pub category: CalculatorCategory,
}

/// The capability set every trade calculator provides.
///
/// Implementations are stateless; the registry hands out `&'static`
/// instances that are shared freely across threads.
pub trait CalculatorModule: Send + Sync {
    /// Id, title and category.
    fn meta(&self) -> CalculatorMeta;

    /// Form fields, in display order.
    fn inputs(&self) -> &'static [InputField] {
        &[]
    }

    /// Result rows, in display order.
    fn outputs(&self) -> &'static [OutputField] {
        &[]
    }

    /// Run the formulas on validated inputs.
    ///
    /// Inputs the formula cannot work with are reported as
    /// `CalcError::CalculationFailed` (or `MissingField`), never a panic.
    fn compute(&self, inputs: &InputValues) -> CalcResult<ComputationResult>;

    /// Step-by-step derivation for a "show your work" display.
    fn explain(&self, inputs: &InputValues) -> String;

    /// Attach to a host container, showing the empty form.
    fn init(&self, container: &mut dyn Container) {
        container.mount(&self.meta(), self.inputs());
    }

    /// False for trades that only carry the placeholder contract.
    fn is_implemented(&self) -> bool {
        true
    }
}

// ============================================================================
// Shared cost fields
// ============================================================================

pub const MARKUP_FIELD: InputField =
    InputField::optional("markup", "Material markup", DEFAULT_MATERIAL_MARKUP).min(0.0).max(1.0);

pub const LABOR_RATE_FIELD: InputField = InputField::optional("labor_rate", "Labor rate", DEFAULT_LABOR_RATE)
    .unit("$/h")
    .min(0.0)
    .max(500.0);

pub const BURDEN_FIELD: InputField =
    InputField::optional("burden", "Labor burden", DEFAULT_LABOR_BURDEN).min(0.0).max(1.0);

pub const OVERHEAD_FIELD: InputField =
    InputField::optional("overhead", "Overhead", DEFAULT_OVERHEAD).min(0.0).max(1.0);

pub const PROFIT_FIELD: InputField = InputField::optional("profit", "Profit", DEFAULT_PROFIT).min(0.0).max(1.0);

/// Default crew rate in dollars per hour
pub const DEFAULT_LABOR_RATE: f64 = 45.0;

pub const MATERIAL_COST_OUTPUT: OutputField = OutputField::new("material_cost", "Material", OutputFormat::currency());
pub const LABOR_COST_OUTPUT: OutputField = OutputField::new("labor_cost", "Labor", OutputFormat::currency());
pub const SUBTOTAL_OUTPUT: OutputField = OutputField::new("subtotal", "Subtotal", OutputFormat::currency());
pub const OVERHEAD_OUTPUT: OutputField = OutputField::new("overhead", "Overhead", OutputFormat::currency());
pub const PROFIT_OUTPUT: OutputField = OutputField::new("profit", "Profit", OutputFormat::currency());
pub const TOTAL_COST_OUTPUT: OutputField =
    OutputField::new("total_cost", "Total (ROM)", OutputFormat::currency());

/// One run of the cost chain for a trade's material quantity.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CostChain {
    pub quantity: f64,
    pub rates: CostRates,
    pub breakdown: CostBreakdown,
}

impl CostChain {
    /// Read the shared rate fields and run material → labor → OH&P.
    pub fn run(inputs: &InputValues, quantity: f64, unit_price: f64, labor_hours: f64) -> CalcResult<Self> {
        let rates = CostRates {
            unit_price,
            markup: inputs.require(MARKUP_FIELD.name)?,
            labor_hours,
            labor_rate: inputs.require(LABOR_RATE_FIELD.name)?,
            burden: inputs.require(BURDEN_FIELD.name)?,
            overhead: inputs.require(OVERHEAD_FIELD.name)?,
            profit: inputs.require(PROFIT_FIELD.name)?,
        };
        Ok(Self {
            quantity,
            rates,
            breakdown: calculate_project_cost(quantity, &rates),
        })
    }

    /// Add the cost rows (and markup/burden details) to a result.
    pub fn apply(&self, result: ComputationResult) -> ComputationResult {
        let cost = &self.breakdown;
        result
            .with(MATERIAL_COST_OUTPUT.key, cost.material.total_cost)
            .with(LABOR_COST_OUTPUT.key, cost.labor.total_cost)
            .with(SUBTOTAL_OUTPUT.key, cost.subtotal)
            .with(OVERHEAD_OUTPUT.key, cost.overhead_and_profit.overhead_amount)
            .with(PROFIT_OUTPUT.key, cost.overhead_and_profit.profit_amount)
            .with(TOTAL_COST_OUTPUT.key, cost.total)
            .with_detail("markup_amount", cost.material.markup_amount)
            .with_detail("burden_amount", cost.labor.burden_amount)
            .with_detail("labor_hours", self.rates.labor_hours)
    }
}

// ============================================================================
// Explanations
// ============================================================================

/// Builder for `explain` text.
pub(crate) struct Explanation {
    text: String,
}

impl Explanation {
    pub fn new(title: &str) -> Self {
        Self {
            text: format!("{}\n", title),
        }
    }

    /// One derivation step citing a library formula.
    pub fn step(mut self, formula: Formula, worked: impl AsRef<str>) -> Self {
        let meta = formula.metadata();
        let _ = writeln!(self.text, "- {}: {}", meta.name, meta.formula_plain);
        let _ = writeln!(self.text, "    {}", worked.as_ref());
        self
    }

    pub fn note(mut self, note: impl AsRef<str>) -> Self {
        let _ = writeln!(self.text, "{}", note.as_ref());
        self
    }

    /// Cost chain steps.
    pub fn cost(self, chain: &CostChain) -> Self {
        let CostChain { quantity, rates, breakdown: cost } = chain;
        self.step(
            Formula::MaterialCost,
            format!(
                "{:.2} x {:.2} x (1 + {}) = {:.2}",
                quantity, rates.unit_price, rates.markup, cost.material.total_cost
            ),
        )
        .step(
            Formula::LaborCost,
            format!(
                "{:.2} h x {:.2} x (1 + {}) = {:.2}",
                rates.labor_hours, rates.labor_rate, rates.burden, cost.labor.total_cost
            ),
        )
        .step(
            Formula::OverheadAndProfit,
            format!(
                "{:.2} + {:.2} + {:.2} = {:.2}",
                cost.subtotal,
                cost.overhead_and_profit.overhead_amount,
                cost.overhead_and_profit.profit_amount,
                cost.total
            ),
        )
    }

    pub fn finish(self) -> String {
        let mut text = self.text;
        text.push_str(ROM_DISCLAIMER);
        text
    }
}

/// Explanation for inputs that do not yet cover every required field.
///
/// Returns `None` when all required fields are present.
pub(crate) fn explain_missing(fields: &[InputField], inputs: &InputValues) -> Option<String> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|f| f.required && !inputs.contains(f.name))
        .map(|f| f.label)
        .collect();
    if missing.is_empty() {
        None
    } else {
        Some(format!("Enter {} to see the calculation.", missing.join(", ")))
    }
}
