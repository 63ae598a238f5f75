//! The rendering collaborator.
//!
//! The engine never draws anything itself. A host (terminal, web page,
//! desktop window) implements [`Container`] and the engine tells it what
//! to show for the current state.

use crate::calculators::CalculatorMeta;
use crate::engine::fields::InputField;
use crate::engine::format::FormattedOutput;
use crate::engine::validation::FieldError;

/// Title of the panel shown when `compute` fails unexpectedly
pub const CALCULATION_ERROR_TITLE: &str = "Calculation Error";

/// A place a calculator form and its results are displayed.
pub trait Container {
    /// Show the (empty) form for a calculator.
    fn mount(&mut self, meta: &CalculatorMeta, fields: &[InputField]);

    /// Remove any result or error display.
    fn clear(&mut self);

    /// Inline messages next to each failing field.
    fn show_field_errors(&mut self, errors: &[FieldError]);

    /// Formatted results in declared order, plus optional detail rows.
    fn show_results(&mut self, rows: &[FormattedOutput], details: &[FormattedOutput]);

    /// Expected "cannot compute" message in the result panel.
    fn show_failure(&mut self, message: &str);

    /// Generic calculation-error panel.
    fn show_error(&mut self, message: &str);
}

/// Everything a [`MemoryContainer`] was asked to show.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerEvent {
    Mounted { title: String, fields: Vec<String> },
    Cleared,
    FieldErrors { messages: Vec<String> },
    Results { rows: Vec<FormattedOutput>, details: Vec<FormattedOutput> },
    Failure { message: String },
    Error { message: String },
}

/// Container that records events instead of drawing.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    pub events: Vec<ContainerEvent>,
}

#[cfg(test)]
impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&ContainerEvent> {
        self.events.last()
    }
}

#[cfg(test)]
impl Container for MemoryContainer {
    fn mount(&mut self, meta: &CalculatorMeta, fields: &[InputField]) {
        self.events.push(ContainerEvent::Mounted {
            title: meta.title.to_string(),
            fields: fields.iter().map(|f| f.name.to_string()).collect(),
        });
    }

    fn clear(&mut self) {
        self.events.push(ContainerEvent::Cleared);
    }

    fn show_field_errors(&mut self, errors: &[FieldError]) {
        self.events.push(ContainerEvent::FieldErrors {
            messages: errors.iter().map(ToString::to_string).collect(),
        });
    }

    fn show_results(&mut self, rows: &[FormattedOutput], details: &[FormattedOutput]) {
        self.events.push(ContainerEvent::Results {
            rows: rows.to_vec(),
            details: details.to_vec(),
        });
    }

    fn show_failure(&mut self, message: &str) {
        self.events.push(ContainerEvent::Failure {
            message: message.to_string(),
        });
    }

    fn show_error(&mut self, message: &str) {
        self.events.push(ContainerEvent::Error {
            message: message.to_string(),
        });
    }
}
