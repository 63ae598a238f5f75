//! Input/output declarations and the value maps that flow through the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::format::Currency;
use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Input Declarations
// ============================================================================

/// Declaration of one form field: its validation contract, not a value.
///
/// Built with const constructors so modules can keep their declarations in
/// `static` arrays:
///
/// ```rust
/// use calc_core::engine::InputField;
///
/// const LENGTH: InputField = InputField::required("length", "Length").unit("ft").min(1.0).max(1000.0);
/// const WASTE: InputField = InputField::optional("waste_factor", "Waste factor", 0.2).min(0.0).max(0.5);
///
/// assert!(LENGTH.required);
/// assert_eq!(WASTE.default, Some(0.2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputField {
    /// Form field name, matches the hosting form's `name` attribute
    pub name: &'static str,
    /// Label used in messages
    pub label: &'static str,
    /// Unit hint shown next to the field
    pub unit: Option<&'static str>,
    pub required: bool,
    /// Inclusive lower bound
    pub min: Option<f64>,
    /// Inclusive upper bound
    pub max: Option<f64>,
    /// Value used when an optional field is left blank
    pub default: Option<f64>,
}

impl InputField {
    /// A field that must be filled in.
    pub const fn required(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            unit: None,
            required: true,
            min: None,
            max: None,
            default: None,
        }
    }

    /// A field that falls back to `default` when left blank.
    pub const fn optional(name: &'static str, label: &'static str, default: f64) -> Self {
        Self {
            name,
            label,
            unit: None,
            required: false,
            min: None,
            max: None,
            default: Some(default),
        }
    }

    pub const fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub const fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub const fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

// ============================================================================
// Output Declarations
// ============================================================================

/// How a result value is displayed.
///
/// `decimals: None` means the per-type default (2, except percentages: 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputFormat {
    Currency {
        decimals: Option<u8>,
        /// Overrides the formatter's currency
        currency: Option<Currency>,
    },
    Number { decimals: Option<u8> },
    Percentage { decimals: Option<u8> },
    Unit { decimals: Option<u8>, unit: &'static str },
}

impl OutputFormat {
    pub const fn currency() -> Self {
        OutputFormat::Currency {
            decimals: None,
            currency: None,
        }
    }

    pub const fn number() -> Self {
        OutputFormat::Number { decimals: None }
    }

    pub const fn percentage() -> Self {
        OutputFormat::Percentage { decimals: None }
    }

    pub const fn unit(unit: &'static str) -> Self {
        OutputFormat::Unit { decimals: None, unit }
    }

    /// Override the number of decimal places.
    pub const fn decimals(self, decimals: u8) -> Self {
        match self {
            OutputFormat::Currency { currency, .. } => OutputFormat::Currency {
                decimals: Some(decimals),
                currency,
            },
            OutputFormat::Number { .. } => OutputFormat::Number {
                decimals: Some(decimals),
            },
            OutputFormat::Percentage { .. } => OutputFormat::Percentage {
                decimals: Some(decimals),
            },
            OutputFormat::Unit { unit, .. } => OutputFormat::Unit {
                decimals: Some(decimals),
                unit,
            },
        }
    }
}

/// Declaration of one displayed result row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputField {
    /// Key into [`ComputationResult::values`]
    pub key: &'static str,
    pub label: &'static str,
    pub format: OutputFormat,
}

impl OutputField {
    pub const fn new(key: &'static str, label: &'static str, format: OutputFormat) -> Self {
        Self { key, label, format }
    }
}

// ============================================================================
// Runtime Values
// ============================================================================

/// Raw form contents: field name to the text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FormData(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<&InputValues> for FormData {
    fn from(values: &InputValues) -> Self {
        values.iter().map(|(k, v)| (k, v.to_string())).collect()
    }
}

/// Validated numeric inputs for one calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputValues(BTreeMap<String, f64>);

impl InputValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Get a value the formula cannot do without.
    pub fn require(&self, name: &str) -> CalcResult<f64> {
        self.get(name).ok_or_else(|| CalcError::missing_field(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of these values with declared defaults filled in for blank
    /// optional fields.
    pub fn with_defaults(&self, fields: &[InputField]) -> InputValues {
        let mut filled = self.clone();
        for field in fields.iter().filter(|f| !self.contains(f.name)) {
            if let Some(default) = field.default {
                filled.insert(field.name, default);
            }
        }
        filled
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for InputValues {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        InputValues(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Output of one successful `compute` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputationResult {
    /// Output key to value; display order comes from the module's
    /// [`OutputField`] declarations
    pub values: BTreeMap<String, f64>,
    /// Intermediate quantities for an advanced display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, f64>>,
}

impl ComputationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: f64) -> Self {
        self.details.get_or_insert_with(BTreeMap::new).insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn detail(&self, key: &str) -> Option<f64> {
        self.details.as_ref().and_then(|d| d.get(key).copied())
    }

    /// First key (values before details) holding NaN or an infinity.
    pub fn first_non_finite(&self) -> Option<&str> {
        self.values
            .iter()
            .chain(self.details.iter().flatten())
            .find(|(_, v)| !v.is_finite())
            .map(|(k, _)| k.as_str())
    }
}
