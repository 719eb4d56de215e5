//! Risk Management Bounded Context
//!
//! Gates a proposed order against account state and the position book before
//! it reaches the broker.
//!
//! # Key Concepts
//!
//! - **Rule Catalog**: One pure check per risk dimension
//! - **Evaluation Pipeline**: Fixed check order selected by operation, contract and side
//! - **Severity Resolver**: `Pass < Warning < Block`; any block rejects the order

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::RiskError;
pub use services::{
    RiskEvaluationService, aggregate_severity, blocking_reasons, get_warnings,
    has_blocking_issues,
};
pub use value_objects::{
    AccountSnapshot, CheckName, CheckResult, ContractType, DetailValue, EvaluationContext,
    Operation, OptionDetails, OptionRight, OrderAction, OrderIntent, PositionRecord, RiskConfig,
    RiskDecision, RiskLevel, SecurityType,
};
