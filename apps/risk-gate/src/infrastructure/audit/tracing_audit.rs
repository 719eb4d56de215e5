//! Audit trail that emits each decision as a structured `tracing` event.

use async_trait::async_trait;
use tracing::info;

use crate::application::dto::RiskAuditEntry;
use crate::application::ports::{AuditError, AuditTrailPort};

/// Target used for audit events, so they can be routed by `RUST_LOG`.
pub const AUDIT_TARGET: &str = "risk_gate::audit";

/// Audit trail writing to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditTrail;

impl TracingAuditTrail {
    /// Create a new tracing audit trail.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditTrailPort for TracingAuditTrail {
    async fn record(&self, entry: &RiskAuditEntry) -> Result<(), AuditError> {
        let checks = serde_json::to_string(&entry.checks).map_err(|e| AuditError::WriteFailed {
            message: e.to_string(),
        })?;

        info!(
            target: AUDIT_TARGET,
            evaluation_id = %entry.evaluation_id,
            recorded_at = %entry.recorded_at,
            operation = %entry.operation,
            symbol = %entry.symbol,
            action = %entry.action,
            quantity = entry.quantity,
            contract_type = %entry.contract_type,
            outcome = entry.decision.label(),
            checks = %checks,
            "Risk decision recorded"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk_management::value_objects::{
        CheckName, CheckResult, Operation, OrderAction, OrderIntent,
    };
    use crate::domain::shared::EvaluationId;

    #[tokio::test]
    async fn records_without_error() {
        let intent = OrderIntent::stock("AAPL", OrderAction::Sell, 5);
        let results = vec![CheckResult::pass(CheckName::Margin, "No margin usage detected")];
        let entry = RiskAuditEntry::new(
            EvaluationId::from("eval-audit"),
            Operation::PlaceOrder,
            &intent,
            &results,
        );

        assert!(TracingAuditTrail::new().record(&entry).await.is_ok());
    }
}
