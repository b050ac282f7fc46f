//! Validation error types

use thiserror::Error;

/// Validation error for domain models and request bodies
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is missing or blank
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field exceeds maximum length, measured in `unit`
    #[error("{field} exceeds maximum length of {max} {unit}")]
    TooLong {
        field: &'static str,
        max: usize,
        unit: &'static str,
    },

    /// Field is present but has the wrong shape
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Request body could not be decoded
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}
