//! Severity Resolver
//!
//! Pure post-processing over an already computed result list.

use crate::domain::risk_management::value_objects::{CheckResult, RiskLevel};

/// True iff at least one result blocks.
#[must_use]
pub fn has_blocking_issues(results: &[CheckResult]) -> bool {
    results.iter().any(CheckResult::is_blocking)
}

/// Warning-level results, in pipeline order.
#[must_use]
pub fn get_warnings(results: &[CheckResult]) -> Vec<&CheckResult> {
    results.iter().filter(|r| r.is_warning()).collect()
}

/// Highest severity in the list; `Pass` for an empty list.
#[must_use]
pub fn aggregate_severity(results: &[CheckResult]) -> RiskLevel {
    results
        .iter()
        .map(CheckResult::level)
        .max()
        .unwrap_or_default()
}

/// Messages of every blocking result, in pipeline order.
#[must_use]
pub fn blocking_reasons(results: &[CheckResult]) -> Vec<&str> {
    results
        .iter()
        .filter(|r| r.is_blocking())
        .map(CheckResult::message)
        .collect()
}
