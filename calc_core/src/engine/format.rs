//! # Result Formatting
//!
//! Turns result values into display strings according to their declared
//! [`OutputFormat`]:
//!
//! | format | default decimals | example (en-US) |
//! |---|---|---|
//! | currency | 2 | `$1,234.50` |
//! | number | 2 | `1,234.50` |
//! | percentage | 1 | `15.0%` (value × 100) |
//! | unit | 2 | `3.56 yd³` |
//!
//! Rounding happens here and only here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::fields::{OutputField, OutputFormat};
use crate::errors::CalcError;

/// Decimal places for currency, number, and unit formats
pub const DEFAULT_DECIMALS: u8 = 2;

/// Decimal places for percentages
pub const DEFAULT_PERCENT_DECIMALS: u8 = 1;

// ============================================================================
// Currency
// ============================================================================

/// Display currency. Values are never converted, only labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "CAD")]
    Cad,
    #[serde(rename = "AUD")]
    Aud,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Cad => "CA$",
            Currency::Aud => "A$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "CAD" => Ok(Currency::Cad),
            "AUD" => Ok(Currency::Aud),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            _ => Err(CalcError::invalid_input(
                "currency",
                s,
                "Expected one of USD, CAD, AUD, EUR, GBP",
            )),
        }
    }
}

// ============================================================================
// Number Locale
// ============================================================================

/// Digit grouping and decimal conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NumberLocale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "fr-FR")]
    FrFr,
}

impl NumberLocale {
    /// BCP 47 language tag
    pub fn tag(&self) -> &'static str {
        match self {
            NumberLocale::EnUs => "en-US",
            NumberLocale::EnGb => "en-GB",
            NumberLocale::DeDe => "de-DE",
            NumberLocale::FrFr => "fr-FR",
        }
    }

    pub fn group_separator(&self) -> char {
        match self {
            NumberLocale::EnUs | NumberLocale::EnGb => ',',
            NumberLocale::DeDe => '.',
            // narrow no-break space
            NumberLocale::FrFr => '\u{202F}',
        }
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            NumberLocale::EnUs | NumberLocale::EnGb => '.',
            NumberLocale::DeDe | NumberLocale::FrFr => ',',
        }
    }

    /// Whether the currency symbol follows the amount ("12,50 €")
    pub fn symbol_after_amount(&self) -> bool {
        matches!(self, NumberLocale::DeDe | NumberLocale::FrFr)
    }
}

impl fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NumberLocale {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" => Ok(NumberLocale::EnUs),
            "en-gb" => Ok(NumberLocale::EnGb),
            "de" | "de-de" => Ok(NumberLocale::DeDe),
            "fr" | "fr-fr" => Ok(NumberLocale::FrFr),
            _ => Err(CalcError::invalid_input(
                "locale",
                s,
                "Expected one of en-US, en-GB, de-DE, fr-FR",
            )),
        }
    }
}

// ============================================================================
// Formatter
// ============================================================================

/// One formatted result row, ready for a container to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedOutput {
    pub key: String,
    pub label: String,
    pub value: f64,
    pub display: String,
}

/// Formats values for one locale and currency.
///
/// Passed explicitly to the engine; there is no global formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Formatter {
    pub locale: NumberLocale,
    pub currency: Currency,
}

impl Formatter {
    pub fn new(locale: NumberLocale, currency: Currency) -> Self {
        Self { locale, currency }
    }

    /// Format a value according to its declared output format.
    ///
    /// ```rust
    /// use calc_core::engine::{Formatter, OutputFormat};
    ///
    /// let f = Formatter::default();
    /// assert_eq!(f.format(3.5556, &OutputFormat::unit("yd³")), "3.56 yd³");
    /// assert_eq!(f.format(0.15, &OutputFormat::percentage()), "15.0%");
    /// ```
    pub fn format(&self, value: f64, format: &OutputFormat) -> String {
        match *format {
            OutputFormat::Currency { decimals, currency } => {
                self.format_currency(value, decimals.unwrap_or(DEFAULT_DECIMALS), currency.unwrap_or(self.currency))
            }
            OutputFormat::Number { decimals } => self.format_number(value, decimals.unwrap_or(DEFAULT_DECIMALS)),
            OutputFormat::Percentage { decimals } => {
                let number = self.format_number(value * 100.0, decimals.unwrap_or(DEFAULT_PERCENT_DECIMALS));
                format!("{}%", number)
            }
            OutputFormat::Unit { decimals, unit } => {
                let number = self.format_number(value, decimals.unwrap_or(DEFAULT_DECIMALS));
                format!("{} {}", number, unit)
            }
        }
    }

    /// Format a declared output row.
    pub fn format_field(&self, field: &OutputField, value: f64) -> FormattedOutput {
        FormattedOutput {
            key: field.key.to_string(),
            label: field.label.to_string(),
            value,
            display: self.format(value, &field.format),
        }
    }

    /// Localized number with fixed decimals and digit grouping.
    pub fn format_number(&self, value: f64, decimals: u8) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let body = self.format_magnitude(value.abs(), decimals);
        if value < 0.0 && !is_zero_display(&body) {
            format!("-{}", body)
        } else {
            body
        }
    }

    fn format_currency(&self, value: f64, decimals: u8, currency: Currency) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let body = self.format_magnitude(value.abs(), decimals);
        let sign = if value < 0.0 && !is_zero_display(&body) { "-" } else { "" };
        if self.locale.symbol_after_amount() {
            format!("{}{} {}", sign, body, currency.symbol())
        } else {
            format!("{}{}{}", sign, currency.symbol(), body)
        }
    }

    fn format_magnitude(&self, magnitude: f64, decimals: u8) -> String {
        let fixed = format!("{:.*}", decimals as usize, magnitude);
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (fixed.as_str(), None),
        };

        let mut out = group_digits(int_part, self.locale.group_separator());
        if let Some(frac) = frac_part {
            out.push(self.locale.decimal_separator());
            out.push_str(frac);
        }
        out
    }
}

/// Insert a separator every three digits from the right.
fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len_utf8());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// "0.00" and friends, so rounding never shows "-0.00"
fn is_zero_display(body: &str) -> bool {
    !body.chars().any(|c| c.is_ascii_digit() && c != '0')
}
