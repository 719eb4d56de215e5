//! Risk management errors.

use std::fmt;

use crate::domain::shared::DomainError;

/// Errors raised outside the evaluation hot path.
///
/// Business outcomes are never errors; they are reported as check results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskError {
    /// Invalid risk configuration.
    InvalidConfiguration {
        /// Configuration field.
        field: String,
        /// Error message.
        message: String,
    },

    /// Malformed order intent rejected at the boundary.
    InvalidIntent {
        /// Offending field.
        field: String,
        /// Error message.
        message: String,
    },
}

impl RiskError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { field, message } => {
                write!(f, "Invalid risk configuration [{field}]: {message}")
            }
            Self::InvalidIntent { field, message } => {
                write!(f, "Invalid order intent [{field}]: {message}")
            }
        }
    }
}

impl std::error::Error for RiskError {}

impl From<DomainError> for RiskError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidValue { field, message } => Self::InvalidIntent { field, message },
            DomainError::MissingField { field } => Self::InvalidIntent {
                field,
                message: "missing required field".to_string(),
            },
        }
    }
}
