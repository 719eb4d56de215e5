//! Risk DTOs

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::risk_management::errors::RiskError;
use crate::domain::risk_management::services::{
    aggregate_severity, blocking_reasons, get_warnings, has_blocking_issues,
};
use crate::domain::risk_management::value_objects::{
    CheckResult, ContractType, DetailValue, Operation, OptionDetails, OrderAction, OrderIntent,
    RiskDecision, RiskLevel,
};
use crate::domain::shared::{EvaluationId, Money, Symbol, Timestamp};

/// Order as submitted by a caller, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderIntentDto {
    /// Symbol to trade.
    pub symbol: String,
    /// BUY or SELL.
    pub action: OrderAction,
    /// Shares or contracts. Signed so that bad input is rejected with a message.
    pub quantity: i64,
    /// Limit price.
    #[serde(default)]
    pub limit_price: Option<Decimal>,
    /// Stop loss.
    #[serde(default)]
    pub stop_loss: Option<Decimal>,
    /// Last quote for market orders.
    #[serde(default)]
    pub reference_price: Option<Decimal>,
    /// STK or OPT.
    #[serde(default)]
    pub contract_type: ContractType,
    /// Option contract terms.
    #[serde(default)]
    pub option_details: Option<OptionDetails>,
    /// Average daily volume.
    #[serde(default)]
    pub average_daily_volume: Option<u64>,
    /// Sector classification.
    #[serde(default)]
    pub sector: Option<String>,
}

impl TryFrom<OrderIntentDto> for OrderIntent {
    type Error = RiskError;

    fn try_from(dto: OrderIntentDto) -> Result<Self, Self::Error> {
        let quantity = u32::try_from(dto.quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| RiskError::InvalidIntent {
                field: "quantity".to_string(),
                message: format!("quantity must be a positive integer, got {}", dto.quantity),
            })?;

        let intent = Self {
            symbol: Symbol::new(dto.symbol),
            action: dto.action,
            quantity,
            limit_price: dto.limit_price.map(Money::new),
            stop_loss: dto.stop_loss.map(Money::new),
            reference_price: dto.reference_price.map(Money::new),
            contract_type: dto.contract_type,
            option_details: dto.option_details,
            average_daily_volume: dto.average_daily_volume,
            sector: dto.sector.filter(|s| !s.trim().is_empty()),
        };
        intent.validate()?;
        Ok(intent)
    }
}

/// Request DTO for a single risk evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateOrderRequestDto {
    /// place_order or modify_order.
    #[serde(default)]
    pub operation: Operation,
    /// Proposed order.
    pub order: OrderIntentDto,
}

/// DTO for one check outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResultDto {
    /// Rule identifier.
    pub check_name: String,
    /// pass, warning or block.
    pub level: RiskLevel,
    /// Explanation.
    pub message: String,
    /// Diagnostics.
    pub details: BTreeMap<String, DetailValue>,
}

impl From<&CheckResult> for CheckResultDto {
    fn from(result: &CheckResult) -> Self {
        Self {
            check_name: result.name().as_str().to_string(),
            level: result.level(),
            message: result.message().to_string(),
            details: result.details().clone(),
        }
    }
}

/// Report returned to the caller after an evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReportDto {
    /// Evaluation identifier, shared with the audit entry.
    pub evaluation_id: EvaluationId,
    /// Operation gated.
    pub operation: Operation,
    /// Symbol.
    pub symbol: Symbol,
    /// Direction.
    pub action: OrderAction,
    /// Quantity.
    pub quantity: u32,
    /// Highest severity.
    pub severity: RiskLevel,
    /// Every check, in pipeline order.
    pub checks: Vec<CheckResultDto>,
    /// Whether any check blocks.
    pub has_blocking: bool,
    /// Whether any check warns.
    pub has_warnings: bool,
    /// Blocking messages, shown as the rejection reason.
    pub blocking_reasons: Vec<String>,
    /// Warning messages, shown alongside an approval.
    pub warnings: Vec<String>,
}

impl RiskReportDto {
    /// Build a report from an evaluation's results.
    #[must_use]
    pub fn new(
        evaluation_id: EvaluationId,
        operation: Operation,
        intent: &OrderIntent,
        results: &[CheckResult],
    ) -> Self {
        let warnings: Vec<String> = get_warnings(results)
            .into_iter()
            .map(|r| r.message().to_string())
            .collect();

        Self {
            evaluation_id,
            operation,
            symbol: intent.symbol.clone(),
            action: intent.action,
            quantity: intent.quantity,
            severity: aggregate_severity(results),
            checks: results.iter().map(CheckResultDto::from).collect(),
            has_blocking: has_blocking_issues(results),
            has_warnings: !warnings.is_empty(),
            blocking_reasons: blocking_reasons(results)
                .into_iter()
                .map(str::to_string)
                .collect(),
            warnings,
        }
    }

    /// Returns true if the order may be submitted.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        !self.has_blocking
    }
}

/// Record written to the audit trail for every evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAuditEntry {
    /// Evaluation identifier.
    pub evaluation_id: EvaluationId,
    /// When the decision was made.
    pub recorded_at: Timestamp,
    /// Operation gated.
    pub operation: Operation,
    /// Symbol.
    pub symbol: Symbol,
    /// Direction.
    pub action: OrderAction,
    /// Quantity.
    pub quantity: u32,
    /// Stock or option.
    pub contract_type: ContractType,
    /// Resolved decision.
    pub decision: RiskDecision,
    /// Every check, in pipeline order.
    pub checks: Vec<CheckResultDto>,
}

impl RiskAuditEntry {
    /// Build an audit entry from an evaluation's results.
    #[must_use]
    pub fn new(
        evaluation_id: EvaluationId,
        operation: Operation,
        intent: &OrderIntent,
        results: &[CheckResult],
    ) -> Self {
        Self {
            evaluation_id,
            recorded_at: Timestamp::now(),
            operation,
            symbol: intent.symbol.clone(),
            action: intent.action,
            quantity: intent.quantity,
            contract_type: intent.contract_type,
            decision: RiskDecision::resolve(results),
            checks: results.iter().map(CheckResultDto::from).collect(),
        }
    }
}
