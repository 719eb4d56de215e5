//! Risk Evaluation Service
//!
//! Runs the rule catalog in a fixed order against one order intent.

use crate::domain::risk_management::errors::RiskError;
use crate::domain::risk_management::value_objects::{
    AccountSnapshot, CheckResult, ContractType, EvaluationContext, Operation, OrderAction,
    OrderIntent, PositionRecord, RiskConfig,
};

use super::option_rules::check_option_risks;
use super::rule_catalog::{
    check_drawdown, check_liquidity, check_margin_usage, check_position_size,
    check_sector_concentration, check_stop_loss, check_total_exposure, check_volatility,
};

/// Risk Evaluation Service - evaluates order intents against a fixed config.
///
/// Holds no mutable state, so one instance can serve concurrent evaluations.
#[derive(Debug, Clone)]
pub struct RiskEvaluationService {
    config: RiskConfig,
}

impl RiskEvaluationService {
    /// Create a service after validating the thresholds.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidConfiguration` if any threshold is invalid.
    pub fn new(config: RiskConfig) -> Result<Self, RiskError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create with default thresholds.
    #[must_use]
    pub fn with_default_config() -> Self {
        Self {
            config: RiskConfig::default(),
        }
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Evaluate one intent.
    ///
    /// Order: stop loss (stocks), margin, position size, total exposure,
    /// volatility, liquidity, sector concentration for `PlaceOrder`; then the
    /// option group for options; then drawdown for sells. Every applicable
    /// check runs even after a block.
    #[must_use]
    pub fn evaluate(
        &self,
        operation: Operation,
        intent: &OrderIntent,
        account: &AccountSnapshot,
        positions: &[PositionRecord],
    ) -> Vec<CheckResult> {
        let ctx = EvaluationContext::new(intent, account, positions, &self.config);
        let mut results = Vec::with_capacity(10);

        if operation == Operation::PlaceOrder {
            if intent.contract_type == ContractType::Stock {
                results.push(check_stop_loss(&ctx));
            }
            results.push(check_margin_usage(&ctx));
            results.push(check_position_size(&ctx));
            results.push(check_total_exposure(&ctx));
            results.push(check_volatility(&ctx));
            results.push(check_liquidity(&ctx));
            results.extend(check_sector_concentration(&ctx));
        }

        if intent.contract_type == ContractType::Option {
            results.extend(check_option_risks(&ctx));
        }

        if intent.action == OrderAction::Sell {
            results.push(check_drawdown(&ctx));
        }

        results
    }
}

impl Default for RiskEvaluationService {
    fn default() -> Self {
        Self::with_default_config()
    }
}
