//! # User Preferences
//!
//! The small amount of state kept between sessions: display currency and
//! locale, the last calculator used, and the last successful inputs for each
//! calculator so a form can be pre-filled.
//!
//! Preferences are stored as pretty-printed JSON; see [`crate::file_io`] for
//! saving and loading.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::engine::{Currency, Formatter, InputValues};
//! use calc_core::preferences::Preferences;
//! use calc_core::registry::CalculatorId;
//!
//! let mut prefs = Preferences::new();
//! prefs.currency = Some(Currency::Cad);
//!
//! let inputs: InputValues = [("area", 600.0)].into_iter().collect();
//! prefs.remember_inputs(CalculatorId::Paint, &inputs);
//!
//! assert_eq!(prefs.formatter(Formatter::default()).currency, Currency::Cad);
//! assert_eq!(prefs.inputs_for(CalculatorId::Paint), Some(&inputs));
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{Currency, Formatter, InputValues, NumberLocale};
use crate::registry::CalculatorId;

/// Current preferences file schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Schema version for compatibility checking
    pub version: String,
    /// Display currency; `None` uses the configured default
    #[serde(default)]
    pub currency: Option<Currency>,
    /// Number locale; `None` uses the configured default
    #[serde(default)]
    pub locale: Option<NumberLocale>,
    #[serde(default)]
    pub last_calculator: Option<CalculatorId>,
    /// Last successful inputs per calculator
    #[serde(default)]
    pub remembered_inputs: BTreeMap<CalculatorId, InputValues>,
    /// When the preferences were last changed
    pub modified: DateTime<Utc>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self::new()
    }
}

impl Preferences {
    pub fn new() -> Self {
        Preferences {
            version: SCHEMA_VERSION.to_string(),
            currency: None,
            locale: None,
            last_calculator: None,
            remembered_inputs: BTreeMap::new(),
            modified: Utc::now(),
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Store the inputs of a successful calculation and mark the calculator
    /// as the last one used.
    pub fn remember_inputs(&mut self, id: CalculatorId, inputs: &InputValues) {
        self.remembered_inputs.insert(id, inputs.clone());
        self.last_calculator = Some(id);
        self.touch();
    }

    pub fn inputs_for(&self, id: CalculatorId) -> Option<&InputValues> {
        self.remembered_inputs.get(&id)
    }

    pub fn forget_inputs(&mut self, id: CalculatorId) -> Option<InputValues> {
        let removed = self.remembered_inputs.remove(&id);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = Some(currency);
        self.touch();
    }

    pub fn set_locale(&mut self, locale: NumberLocale) {
        self.locale = Some(locale);
        self.touch();
    }

    /// Formatter with the saved choices applied over `fallback`.
    pub fn formatter(&self, fallback: Formatter) -> Formatter {
        Formatter {
            locale: self.locale.unwrap_or(fallback.locale),
            currency: self.currency.unwrap_or(fallback.currency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_preferences() {
        let prefs = Preferences::new();
        assert_eq!(prefs.version, SCHEMA_VERSION);
        assert!(prefs.remembered_inputs.is_empty());
        assert_eq!(prefs.formatter(Formatter::default()), Formatter::default());
    }

    #[test]
    fn test_remember_replaces_previous_inputs() {
        let mut prefs = Preferences::new();
        let first: InputValues = [("hours", 8.0)].into_iter().collect();
        let second: InputValues = [("hours", 12.0)].into_iter().collect();

        prefs.remember_inputs(CalculatorId::Labor, &first);
        let modified = prefs.modified;
        prefs.remember_inputs(CalculatorId::Labor, &second);

        assert_eq!(prefs.inputs_for(CalculatorId::Labor), Some(&second));
        assert_eq!(prefs.last_calculator, Some(CalculatorId::Labor));
        assert!(prefs.modified >= modified);
    }

    #[test]
    fn test_forget_inputs() {
        let mut prefs = Preferences::new();
        prefs.remember_inputs(CalculatorId::Paint, &[("area", 100.0)].into_iter().collect());
        assert!(prefs.forget_inputs(CalculatorId::Paint).is_some());
        assert!(prefs.forget_inputs(CalculatorId::Paint).is_none());
    }

    #[test]
    fn test_formatter_prefers_saved_choices() {
        let mut prefs = Preferences::new();
        prefs.set_locale(NumberLocale::DeDe);
        let fallback = Formatter::new(NumberLocale::EnGb, Currency::Gbp);
        let f = prefs.formatter(fallback);
        assert_eq!(f.locale, NumberLocale::DeDe);
        assert_eq!(f.currency, Currency::Gbp);
    }

    #[test]
    fn test_json_keys_are_calculator_ids() {
        let mut prefs = Preferences::new();
        prefs.remember_inputs(CalculatorId::Concrete, &[("length", 20.0)].into_iter().collect());
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains(r#""remembered_inputs":{"concrete":{"length":20.0}}"#));
        assert!(json.contains(r#""last_calculator":"concrete""#));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"version":"0.1.0","modified":"2025-01-01T00:00:00Z"}"#;
        let prefs: Preferences = serde_json::from_str(json).unwrap();
        assert_eq!(prefs.currency, None);
        assert!(prefs.remembered_inputs.is_empty());
    }
}
