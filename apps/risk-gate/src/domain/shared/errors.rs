//! Domain errors shared across the risk gate.

use std::fmt;

/// Domain-level errors raised while constructing value objects.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Required field missing from an input.
    MissingField {
        /// Field name.
        field: String,
    },
}

impl DomainError {
    /// Create an invalid value error.
    #[must_use]
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::MissingField { field } => write!(f, "Missing required field '{field}'"),
        }
    }
}

impl std::error::Error for DomainError {}
