//! Form reading and per-field validation.
//!
//! Every declared field is checked on its own and all problems are
//! collected, so the user sees every bad field at once. Bounds are
//! inclusive.

use serde::Serialize;
use thiserror::Error;

use crate::engine::fields::{FormData, InputField, InputValues};

/// A problem with one form field.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    #[error("{label} is required")]
    Required { field: String, label: String },

    #[error("{label} must be a number (got '{raw}')")]
    NotANumber {
        field: String,
        label: String,
        raw: String,
    },

    #[error("{label} must be at least {min}")]
    BelowMin {
        field: String,
        label: String,
        value: f64,
        min: f64,
    },

    #[error("{label} must be at most {max}")]
    AboveMax {
        field: String,
        label: String,
        value: f64,
        max: f64,
    },
}

impl FieldError {
    /// Name of the offending form field
    pub fn field(&self) -> &str {
        match self {
            FieldError::Required { field, .. }
            | FieldError::NotANumber { field, .. }
            | FieldError::BelowMin { field, .. }
            | FieldError::AboveMax { field, .. } => field,
        }
    }
}

/// Parse one raw text value. Blank means "not entered".
fn parse_value(raw: Option<&str>) -> Result<Option<f64>, String> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(text.to_string()),
    }
}

/// Check a single field, yielding the value to use (if any).
fn check_field(field: &InputField, raw: Option<&str>) -> Result<Option<f64>, FieldError> {
    let value = parse_value(raw).map_err(|raw| FieldError::NotANumber {
        field: field.name.to_string(),
        label: field.label.to_string(),
        raw,
    })?;

    let Some(value) = value else {
        if field.required {
            return Err(FieldError::Required {
                field: field.name.to_string(),
                label: field.label.to_string(),
            });
        }
        return Ok(field.default);
    };

    if let Some(min) = field.min {
        if value < min {
            return Err(FieldError::BelowMin {
                field: field.name.to_string(),
                label: field.label.to_string(),
                value,
                min,
            });
        }
    }
    if let Some(max) = field.max {
        if value > max {
            return Err(FieldError::AboveMax {
                field: field.name.to_string(),
                label: field.label.to_string(),
                value,
                max,
            });
        }
    }
    Ok(Some(value))
}

/// Read and validate a form against the declared fields.
///
/// Returns the numeric inputs (with defaults applied to blank optional
/// fields) or every field error found. Form entries that no field declares
/// are ignored.
///
/// ```rust
/// use calc_core::engine::{read_form, FormData, InputField};
///
/// let fields = [
///     InputField::required("length", "Length").min(1.0),
///     InputField::required("width", "Width").min(1.0),
/// ];
/// let form: FormData = [("length", "0"), ("width", "")].into_iter().collect();
///
/// let errors = read_form(&fields, &form).unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
pub fn read_form(fields: &[InputField], form: &FormData) -> Result<InputValues, Vec<FieldError>> {
    let mut values = InputValues::new();
    let mut errors = Vec::new();

    for field in fields {
        match check_field(field, form.get(field.name)) {
            Ok(Some(value)) => values.insert(field.name, value),
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> [InputField; 3] {
        [
            InputField::required("length", "Length").min(1.0).max(100.0),
            InputField::required("width", "Width").min(1.0).max(100.0),
            InputField::optional("waste_factor", "Waste factor", 0.1).min(0.0).max(0.5),
        ]
    }

    #[test]
    fn test_valid_form_applies_defaults() {
        let form: FormData = [("length", "20"), ("width", " 12 ")].into_iter().collect();
        let values = read_form(&fields(), &form).unwrap();
        assert_eq!(values.get("length"), Some(20.0));
        assert_eq!(values.get("width"), Some(12.0));
        assert_eq!(values.get("waste_factor"), Some(0.1));
    }

    #[test]
    fn test_all_errors_collected() {
        let form: FormData = [("length", "0"), ("waste_factor", "0.9")].into_iter().collect();
        let errors = read_form(&fields(), &form).unwrap_err();
        let names: Vec<&str> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(names, vec!["length", "width", "waste_factor"]);
        assert!(matches!(errors[0], FieldError::BelowMin { min, .. } if min == 1.0));
        assert!(matches!(errors[1], FieldError::Required { .. }));
        assert!(matches!(errors[2], FieldError::AboveMax { max, .. } if max == 0.5));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let at_bounds: FormData = [("length", "1"), ("width", "100"), ("waste_factor", "0")].into_iter().collect();
        assert!(read_form(&fields(), &at_bounds).is_ok());

        let outside: FormData = [("length", "0"), ("width", "101")].into_iter().collect();
        let errors = read_form(&fields(), &outside).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_not_a_number() {
        let form: FormData = [("length", "twenty"), ("width", "inf")].into_iter().collect();
        let errors = read_form(&fields(), &form).unwrap_err();
        assert!(matches!(&errors[0], FieldError::NotANumber { raw, .. } if raw == "twenty"));
        assert!(matches!(&errors[1], FieldError::NotANumber { .. }));
    }

    #[test]
    fn test_messages() {
        let form: FormData = [("length", "0.5"), ("width", "500")].into_iter().collect();
        let errors = read_form(&fields(), &form).unwrap_err();
        assert_eq!(errors[0].to_string(), "Length must be at least 1");
        assert_eq!(errors[1].to_string(), "Width must be at most 100");

        let empty = FormData::new();
        let errors = read_form(&fields(), &empty).unwrap_err();
        assert_eq!(errors[0].to_string(), "Length is required");
    }

    #[test]
    fn test_undeclared_entries_ignored() {
        let form: FormData = [("length", "2"), ("width", "2"), ("color", "blue")].into_iter().collect();
        let values = read_form(&fields(), &form).unwrap();
        assert!(!values.contains("color"));
    }
}
