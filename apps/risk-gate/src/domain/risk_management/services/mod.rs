//! Risk Management Domain Services

pub mod option_rules;
pub mod risk_evaluation_service;
pub mod rule_catalog;
pub mod severity;

pub use option_rules::check_option_risks;
pub use risk_evaluation_service::RiskEvaluationService;
pub use severity::{aggregate_severity, blocking_reasons, get_warnings, has_blocking_issues};
