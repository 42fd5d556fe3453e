//! # Error Types
//!
//! Structured error types for estimate_core. The estimating engine itself never
//! fails (bad numbers fall back to defaults), so these errors come from the
//! edges: rate-book configuration, strict validation, and document file I/O.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{EstimateError, CalcResult};
//!
//! fn check_rate(field: &str, rate: f64) -> CalcResult<()> {
//!     if !(rate > 0.0) {
//!         let value = rate.to_string();
//!         return Err(EstimateError::invalid_input(field, value, "Rate must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_rate("walls.roll", 175.0).is_ok());
//! assert_eq!(check_rate("walls.roll", 0.0).unwrap_err().error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationIssue;

/// Result type alias for estimate_core operations
pub type CalcResult<T> = Result<T, EstimateError>;

/// Structured error type for estimating operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Strict validation found problems the engine would silently absorb
    #[error("Estimate failed validation with {} issue(s)", .issues.len())]
    ValidationFailed { issues: Vec<ValidationIssue> },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Estimate document is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Document schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl EstimateError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        EstimateError::MissingField {
            field: field.into(),
        }
    }

    /// Create a ValidationFailed error from the collected issues
    pub fn validation_failed(issues: Vec<ValidationIssue>) -> Self {
        EstimateError::ValidationFailed { issues }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        EstimateError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError from any displayable cause
    pub fn serialization(reason: impl std::fmt::Display) -> Self {
        EstimateError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Whether retrying later may succeed (someone else holds the lock)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EstimateError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::MissingField { .. } => "MISSING_FIELD",
            EstimateError::ValidationFailed { .. } => "VALIDATION_FAILED",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::FileLocked { .. } => "FILE_LOCKED",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
