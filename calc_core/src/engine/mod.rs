//! # Generic Calculator Engine
//!
//! Drives the form → validate → compute → render cycle for any
//! [`CalculatorModule`], using only the module's input/output declarations.
//!
//! ## States
//!
//! ```text
//!            calculate()                 every field valid
//!   Idle ───────────────▶ (validating) ─────────────────────▶ Computed
//!    ▲                         │                               Failed
//!    │ edit()                  │ any field invalid             Errored
//!    └──────────────── Invalid ◀┘
//! ```
//!
//! Every outcome ends at the engine boundary. A failing or panicking
//! `compute` becomes a state, never an error for the host.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::engine::{CalculatorEngine, EngineState, FormData, Formatter};
//! use calc_core::registry::CalculatorId;
//!
//! let mut engine = CalculatorEngine::new(CalculatorId::Paint.module(), Formatter::default());
//! let form: FormData = [("area", "600")].into_iter().collect();
//!
//! match engine.calculate(&form) {
//!     EngineState::Computed { rows, .. } => assert_eq!(rows[0].display, "3.43 gal"),
//!     other => panic!("unexpected state: {:?}", other),
//! }
//! ```

pub mod container;
pub mod fields;
pub mod format;
pub mod validation;

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;
use tracing::{debug, error};

use crate::calculators::CalculatorModule;

pub use container::{Container, CALCULATION_ERROR_TITLE};
#[cfg(test)]
use container::{ContainerEvent, MemoryContainer};
pub use fields::{ComputationResult, FormData, InputField, InputValues, OutputField, OutputFormat};
pub use format::{Currency, FormattedOutput, Formatter, NumberLocale};
pub use validation::{read_form, FieldError};

/// Where the engine is in the calculate cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EngineState {
    /// Form shown, nothing calculated
    Idle,
    /// One or more fields failed validation; `compute` was not called
    Invalid { errors: Vec<FieldError> },
    /// Valid inputs, result rendered
    Computed {
        inputs: InputValues,
        result: ComputationResult,
        rows: Vec<FormattedOutput>,
        details: Vec<FormattedOutput>,
    },
    /// The calculator reported it cannot compute these inputs
    Failed { message: String },
    /// `compute` misbehaved (unexpected error, non-finite value, panic)
    Errored { message: String },
}

impl EngineState {
    pub fn is_computed(&self) -> bool {
        matches!(self, EngineState::Computed { .. })
    }
}

/// Form engine bound to one calculator module.
pub struct CalculatorEngine<'m> {
    module: &'m dyn CalculatorModule,
    formatter: Formatter,
    state: EngineState,
}

impl<'m> CalculatorEngine<'m> {
    pub fn new(module: &'m dyn CalculatorModule, formatter: Formatter) -> Self {
        Self {
            module,
            formatter,
            state: EngineState::Idle,
        }
    }

    /// Create an engine and mount the module's form into a container.
    pub fn attach(module: &'m dyn CalculatorModule, formatter: Formatter, container: &mut dyn Container) -> Self {
        module.init(container);
        Self::new(module, formatter)
    }

    pub fn module(&self) -> &'m dyn CalculatorModule {
        self.module
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Run one calculate action. Replaces whatever was displayed before.
    pub fn calculate(&mut self, form: &FormData) -> &EngineState {
        let id = self.module.meta().id;
        self.state = match read_form(self.module.inputs(), form) {
            Err(errors) => {
                debug!(calculator = %id, errors = errors.len(), "Validation failed");
                EngineState::Invalid { errors }
            }
            Ok(inputs) => self.run_compute(inputs),
        };
        &self.state
    }

    /// The user edited the form; drop the previous outcome.
    pub fn edit(&mut self) {
        self.state = EngineState::Idle;
    }

    /// Show the current state in a container.
    pub fn render(&self, container: &mut dyn Container) {
        container.clear();
        match &self.state {
            EngineState::Idle => {}
            EngineState::Invalid { errors } => container.show_field_errors(errors),
            EngineState::Computed { rows, details, .. } => container.show_results(rows, details),
            EngineState::Failed { message } => container.show_failure(message),
            EngineState::Errored { message } => container.show_error(message),
        }
    }

    fn run_compute(&self, inputs: InputValues) -> EngineState {
        let id = self.module.meta().id;
        let module = self.module;

        let outcome = match catch_unwind(AssertUnwindSafe(|| module.compute(&inputs))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(calculator = %id, %message, "Calculator panicked during compute");
                return EngineState::Errored { message };
            }
        };

        match outcome {
            Ok(result) => {
                if let Some(key) = result.first_non_finite() {
                    let message = format!("Calculation produced a non-finite value for '{}'", key);
                    error!(calculator = %id, key, "Non-finite calculation result");
                    return EngineState::Errored { message };
                }
                debug!(calculator = %id, outputs = result.values.len(), "Computed");
                let rows = self.format_rows(&result);
                let details = self.format_details(&result);
                EngineState::Computed {
                    inputs,
                    result,
                    rows,
                    details,
                }
            }
            Err(e) if e.is_computation_failure() => {
                debug!(calculator = %id, reason = %e, "Computation failure");
                EngineState::Failed {
                    message: e.user_message(),
                }
            }
            Err(e) => {
                error!(calculator = %id, error = %e, code = e.error_code(), "Unexpected calculation error");
                EngineState::Errored { message: e.to_string() }
            }
        }
    }

    /// Rows in the module's declared output order.
    fn format_rows(&self, result: &ComputationResult) -> Vec<FormattedOutput> {
        self.module
            .outputs()
            .iter()
            .filter_map(|field| match result.get(field.key) {
                Some(value) => Some(self.formatter.format_field(field, value)),
                None => {
                    debug!(key = field.key, "Declared output missing from result");
                    None
                }
            })
            .collect()
    }

    fn format_details(&self, result: &ComputationResult) -> Vec<FormattedOutput> {
        let format = OutputFormat::number();
        result
            .details
            .iter()
            .flatten()
            .map(|(key, value)| FormattedOutput {
                key: key.clone(),
                label: key.replace('_', " "),
                value: *value,
                display: self.formatter.format(*value, &format),
            })
            .collect()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "calculator panicked".to_string()
    }
}
