//! Risk severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a single check outcome.
///
/// Ordered `Pass < Warning < Block`, so the severity of a result list is
/// simply its maximum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Check passed.
    #[default]
    Pass,
    /// Reported to the caller but does not prevent submission.
    Warning,
    /// Prevents the order from being submitted.
    Block,
}

impl RiskLevel {
    /// Lowercase identifier used in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Warning => "warning",
            Self::Block => "block",
        }
    }

    /// Returns true for `Block`.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Block)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Warning => write!(f, "WARNING"),
            Self::Block => write!(f, "BLOCK"),
        }
    }
}
