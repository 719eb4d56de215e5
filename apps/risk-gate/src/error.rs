//! Crate-level error handling for the risk gate.
//!
//! A risk evaluation never fails because of what the rules find: blocks and
//! warnings are results, not errors. `GateError` covers the cases where no
//! decision could be produced at all.
//!
//! # Error Codes
//!
//! | Code | Usage |
//! |------|-------|
//! | `INVALID_CONFIG` | Configuration file unreadable or out of range |
//! | `INVALID_INTENT` | Malformed order intent |
//! | `SNAPSHOT_UNAVAILABLE` | Account or positions could not be read |
//! | `SNAPSHOT_MALFORMED` | Account or positions could not be decoded |
//! | `AUDIT_FAILED` | Decision could not be recorded |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::{AuditError, SnapshotError};
use crate::config::ConfigError;
use crate::domain::risk_management::errors::RiskError;

/// Error codes for the risk gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Configuration file unreadable or thresholds out of range.
    InvalidConfig,
    /// Order intent failed validation.
    InvalidIntent,
    /// Snapshot source could not be read.
    SnapshotUnavailable,
    /// Snapshot payload could not be decoded.
    SnapshotMalformed,
    /// Audit sink rejected the entry.
    AuditFailed,
}

impl ErrorCode {
    /// Reason string for logs and callers.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::InvalidIntent => "INVALID_INTENT",
            Self::SnapshotUnavailable => "SNAPSHOT_UNAVAILABLE",
            Self::SnapshotMalformed => "SNAPSHOT_MALFORMED",
            Self::AuditFailed => "AUDIT_FAILED",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Errors that prevent a risk decision from being produced.
#[derive(Debug, Error)]
pub enum GateError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Thresholds or intent rejected by the domain.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// Snapshot could not be obtained.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Decision could not be recorded. The order must be treated as rejected.
    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl GateError {
    /// Error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Config(_) | Self::Risk(RiskError::InvalidConfiguration { .. }) => {
                ErrorCode::InvalidConfig
            }
            Self::Risk(RiskError::InvalidIntent { .. }) => ErrorCode::InvalidIntent,
            Self::Snapshot(SnapshotError::Unavailable { .. }) => ErrorCode::SnapshotUnavailable,
            Self::Snapshot(SnapshotError::Malformed { .. } | SnapshotError::InvalidTag { .. }) => {
                ErrorCode::SnapshotMalformed
            }
            Self::Audit(_) => ErrorCode::AuditFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_reason_strings() {
        assert_eq!(ErrorCode::InvalidIntent.reason(), "INVALID_INTENT");
        assert_eq!(ErrorCode::AuditFailed.to_string(), "AUDIT_FAILED");
    }

    #[test]
    fn gate_error_maps_codes() {
        let err = GateError::from(RiskError::InvalidIntent {
            field: "quantity".to_string(),
            message: "must be positive".to_string(),
        });
        assert_eq!(err.code(), ErrorCode::InvalidIntent);

        let err = GateError::from(RiskError::configuration("max_drawdown_pct", "out of range"));
        assert_eq!(err.code(), ErrorCode::InvalidConfig);

        let err = GateError::from(SnapshotError::InvalidTag {
            tag: "NetLiquidation".to_string(),
            value: "n/a".to_string(),
        });
        assert_eq!(err.code(), ErrorCode::SnapshotMalformed);
        assert!(err.to_string().contains("NetLiquidation"));

        let err = GateError::from(AuditError::WriteFailed {
            message: "disk full".to_string(),
        });
        assert_eq!(err.code(), ErrorCode::AuditFailed);
    }

    #[test]
    fn gate_error_displays_source_message() {
        let err = GateError::from(SnapshotError::Unavailable {
            message: "connection refused".to_string(),
        });
        assert_eq!(err.to_string(), "Snapshot source unavailable: connection refused");
    }
}
