//! Trades listed in the catalog that do not have formulas yet.
//!
//! They show up in the catalog and search with their title and category,
//! but declare no fields, always fail with "Not implemented", and explain
//! themselves as "TBD".

use crate::calculators::{CalculatorMeta, CalculatorModule, EXPLAIN_PLACEHOLDER};
use crate::engine::{ComputationResult, InputValues};
use crate::errors::{CalcError, CalcResult};
use crate::registry::{CalculatorCategory, CalculatorId};

#[derive(Debug, Clone, Copy)]
pub struct PlaceholderCalculator {
    id: CalculatorId,
    title: &'static str,
    category: CalculatorCategory,
}

impl PlaceholderCalculator {
    pub const fn new(id: CalculatorId, title: &'static str, category: CalculatorCategory) -> Self {
        Self { id, title, category }
    }
}

impl CalculatorModule for PlaceholderCalculator {
    fn meta(&self) -> CalculatorMeta {
        CalculatorMeta {
            id: self.id,
            title: self.title,
            category: self.category,
        }
    }

    fn compute(&self, _inputs: &InputValues) -> CalcResult<ComputationResult> {
        Err(CalcError::not_implemented(self.id.as_str()))
    }

    fn explain(&self, _inputs: &InputValues) -> String {
        EXPLAIN_PLACEHOLDER.to_string()
    }

    fn is_implemented(&self) -> bool {
        false
    }
}
