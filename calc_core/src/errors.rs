//! # Error Types
//!
//! Structured error types for calc_core. These errors are designed to be
//! informative for both humans and programmatic consumers, providing enough
//! context to understand and fix issues.
//!
//! Per-field form validation problems are not `CalcError`s; they are collected
//! as [`FieldError`](crate::engine::FieldError) values by the engine.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_coverage(coverage: f64) -> CalcResult<()> {
//!     if coverage <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "coverage".to_string(),
//!             value: coverage.to_string(),
//!             reason: "Coverage must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Message carried by calculators that have no formula yet.
pub const NOT_IMPLEMENTED: &str = "Not implemented";

/// Structured error type for calculator operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A value the formula needs is not present in the inputs
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// No calculator is registered under this id
    #[error("Calculator not found: {id}")]
    CalculatorNotFound { id: String },

    /// The calculator cannot produce a result for these inputs
    #[error("Calculation failed: {calculator} - {reason}")]
    CalculationFailed { calculator: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Configuration could not be read or applied
    #[error("Configuration error in {source_name}: {reason}")]
    ConfigError { source_name: String, reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a CalculatorNotFound error
    pub fn calculator_not_found(id: impl Into<String>) -> Self {
        CalcError::CalculatorNotFound { id: id.into() }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculator: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculator: calculator.into(),
            reason: reason.into(),
        }
    }

    /// The placeholder failure returned by unfinished calculators
    pub fn not_implemented(calculator: impl Into<String>) -> Self {
        Self::calculation_failed(calculator, NOT_IMPLEMENTED)
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CalcError::Internal {
            message: message.into(),
        }
    }

    /// True for the expected "cannot compute" outcomes of a calculator.
    ///
    /// These are shown as a result-panel message. Everything else coming out
    /// of `compute` is treated as an unexpected calculation error.
    pub fn is_computation_failure(&self) -> bool {
        matches!(
            self,
            CalcError::CalculationFailed { .. } | CalcError::MissingField { .. }
        )
    }

    /// Short user-facing message without the variant prefix.
    pub fn user_message(&self) -> String {
        match self {
            CalcError::CalculationFailed { reason, .. } => reason.clone(),
            CalcError::MissingField { field } => format!("Missing value for '{}'", field),
            other => other.to_string(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::CalculatorNotFound { .. } => "CALCULATOR_NOT_FOUND",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("coverage", "-5", "Coverage must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("length").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::calculator_not_found("pool").error_code(), "CALCULATOR_NOT_FOUND");
        assert_eq!(CalcError::config_error("env", "bad").error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_not_implemented_is_computation_failure() {
        let err = CalcError::not_implemented("roofing");
        assert!(err.is_computation_failure());
        assert_eq!(err.user_message(), NOT_IMPLEMENTED);
        assert!(!CalcError::internal("boom").is_computation_failure());
    }
}
