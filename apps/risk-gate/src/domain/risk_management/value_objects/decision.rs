//! Final verdict derived from a result list.

use serde::{Deserialize, Serialize};

use super::CheckResult;

/// Outcome of an evaluation once severity has been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RiskDecision {
    /// No blocking result. Warnings travel with the approval.
    Approved {
        /// Warning-level results, in pipeline order.
        warnings: Vec<CheckResult>,
    },
    /// At least one blocking result.
    Blocked {
        /// Messages of the blocking results, in pipeline order.
        reasons: Vec<String>,
        /// Warning-level results, in pipeline order.
        warnings: Vec<CheckResult>,
    },
}

impl RiskDecision {
    /// Resolve a result list into a decision.
    #[must_use]
    pub fn resolve(results: &[CheckResult]) -> Self {
        let warnings: Vec<CheckResult> = results.iter().filter(|r| r.is_warning()).cloned().collect();
        let reasons: Vec<String> = results
            .iter()
            .filter(|r| r.is_blocking())
            .map(|r| r.message().to_string())
            .collect();

        if reasons.is_empty() {
            Self::Approved { warnings }
        } else {
            Self::Blocked { reasons, warnings }
        }
    }

    /// Returns true if the order must not be submitted.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    /// Warnings to show alongside the decision.
    #[must_use]
    pub fn warnings(&self) -> &[CheckResult] {
        match self {
            Self::Approved { warnings } | Self::Blocked { warnings, .. } => warnings,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Approved { .. } => "approved",
            Self::Blocked { .. } => "blocked",
        }
    }
}
