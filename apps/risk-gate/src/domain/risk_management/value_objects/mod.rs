//! Risk Management Value Objects

mod account_snapshot;
mod check_result;
mod decision;
mod evaluation_context;
mod order_intent;
mod position_record;
mod risk_config;
mod risk_level;

pub use account_snapshot::AccountSnapshot;
pub use check_result::{CheckName, CheckResult, DetailValue};
pub use decision::RiskDecision;
pub use evaluation_context::{EvaluationContext, Operation};
pub use order_intent::{
    CONTRACT_MULTIPLIER, ContractType, OptionDetails, OptionRight, OrderAction, OrderIntent,
};
pub use position_record::{PositionRecord, SecurityType};
pub use risk_config::RiskConfig;
pub use risk_level::RiskLevel;
