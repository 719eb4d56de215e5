//! Evaluate Order Use Case

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::dto::{EvaluateOrderRequestDto, RiskAuditEntry, RiskReportDto};
use crate::application::ports::{AuditTrailPort, SnapshotProviderPort};
use crate::domain::risk_management::services::RiskEvaluationService;
use crate::domain::risk_management::value_objects::OrderIntent;
use crate::domain::shared::EvaluationId;
use crate::error::GateError;

/// Use case for gating one order through the risk checks.
///
/// Reads a fresh snapshot, evaluates, records the decision, then returns the
/// report. An order is only approved once its decision has been recorded.
pub struct EvaluateOrderUseCase<S, A>
where
    S: SnapshotProviderPort,
    A: AuditTrailPort,
{
    service: Arc<RiskEvaluationService>,
    snapshots: Arc<S>,
    audit: Arc<A>,
}

impl<S, A> EvaluateOrderUseCase<S, A>
where
    S: SnapshotProviderPort,
    A: AuditTrailPort,
{
    /// Create a new EvaluateOrderUseCase.
    pub const fn new(service: Arc<RiskEvaluationService>, snapshots: Arc<S>, audit: Arc<A>) -> Self {
        Self {
            service,
            snapshots,
            audit,
        }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Risk` for a malformed intent, `GateError::Snapshot`
    /// when the snapshot cannot be read, and `GateError::Audit`
    /// when the decision cannot be recorded.
    pub async fn execute(&self, request: EvaluateOrderRequestDto) -> Result<RiskReportDto, GateError> {
        let operation = request.operation;
        let intent = OrderIntent::try_from(request.order)?;

        let snapshot = self.snapshots.snapshot().await?;

        let results = self.service.evaluate(
            operation,
            &intent,
            &snapshot.account,
            &snapshot.positions,
        );

        let evaluation_id = EvaluationId::generate();
        let report = RiskReportDto::new(evaluation_id.clone(), operation, &intent, &results);

        if report.has_blocking {
            warn!(
                evaluation_id = %evaluation_id,
                operation = %operation,
                symbol = %intent.symbol,
                action = ?intent.action,
                quantity = intent.quantity,
                reasons = ?report.blocking_reasons,
                "Order blocked by risk checks"
            );
        } else {
            info!(
                evaluation_id = %evaluation_id,
                operation = %operation,
                symbol = %intent.symbol,
                action = ?intent.action,
                quantity = intent.quantity,
                checks = report.checks.len(),
                warnings = report.warnings.len(),
                "Order approved by risk checks"
            );
        }

        for warning in &report.warnings {
            warn!(
                evaluation_id = %evaluation_id,
                symbol = %intent.symbol,
                warning = %warning,
                "Risk warning"
            );
        }

        let entry = RiskAuditEntry::new(evaluation_id, operation, &intent, &results);
        self.audit.record(&entry).await?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::OrderIntentDto;
    use crate::application::ports::{
        AuditError, InMemoryAuditTrail, InMemorySnapshotProvider, PortfolioSnapshot,
        SnapshotError,
    };
    use crate::domain::risk_management::value_objects::{
        AccountSnapshot, ContractType, Operation, OrderAction, PositionRecord, RiskConfig,
        RiskLevel,
    };
    use crate::domain::shared::Money;
    use crate::error::ErrorCode;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn account() -> AccountSnapshot {
        AccountSnapshot::new(
            Money::from_units(100_000),
            Money::from_units(90_000),
            Money::from_units(50_000),
        )
    }

    fn buy_request(stop_loss: Option<rust_decimal::Decimal>) -> EvaluateOrderRequestDto {
        EvaluateOrderRequestDto {
            operation: Operation::PlaceOrder,
            order: OrderIntentDto {
                symbol: "AAPL".to_string(),
                action: OrderAction::Buy,
                quantity: 10,
                limit_price: Some(dec!(150)),
                stop_loss,
                reference_price: None,
                contract_type: ContractType::Stock,
                option_details: None,
                average_daily_volume: None,
                sector: None,
            },
        }
    }

    fn use_case(
        provider: InMemorySnapshotProvider,
    ) -> (
        EvaluateOrderUseCase<InMemorySnapshotProvider, InMemoryAuditTrail>,
        Arc<InMemoryAuditTrail>,
    ) {
        let audit = Arc::new(InMemoryAuditTrail::new());
        let use_case = EvaluateOrderUseCase::new(
            Arc::new(RiskEvaluationService::default()),
            Arc::new(provider),
            Arc::clone(&audit),
        );
        (use_case, audit)
    }

    struct FailingAudit;

    #[async_trait]
    impl AuditTrailPort for FailingAudit {
        async fn record(&self, _entry: &RiskAuditEntry) -> Result<(), AuditError> {
            Err(AuditError::WriteFailed {
                message: "sink closed".to_string(),
            })
        }
    }

    struct OfflineSnapshots;

    #[async_trait]
    impl SnapshotProviderPort for OfflineSnapshots {
        async fn snapshot(&self) -> Result<PortfolioSnapshot, SnapshotError> {
            Err(SnapshotError::Unavailable {
                message: "gateway offline".to_string(),
            })
        }
    }

    /// Serves a different book on every read.
    struct ShiftingSnapshots {
        reads: AtomicUsize,
    }

    #[async_trait]
    impl SnapshotProviderPort for ShiftingSnapshots {
        async fn snapshot(&self) -> Result<PortfolioSnapshot, SnapshotError> {
            let read = self.reads.fetch_add(1, Ordering::SeqCst);
            if read == 0 {
                return Ok(PortfolioSnapshot::new(account(), Vec::new()));
            }
            // A later read that would push AAPL over the position limit.
            Ok(PortfolioSnapshot::new(
                account(),
                vec![PositionRecord::stock("AAPL", dec!(1000), Money::from_units(150))],
            ))
        }
    }

    #[tokio::test]
    async fn approves_and_records_clean_order() {
        let (use_case, audit) = use_case(InMemorySnapshotProvider::new(account(), Vec::new()));

        let report = use_case.execute(buy_request(Some(dec!(140)))).await.unwrap();

        assert!(report.is_approved());
        assert_eq!(report.severity, RiskLevel::Pass);
        assert_eq!(report.checks.len(), 6);

        let entries = audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].evaluation_id, report.evaluation_id);
        assert!(!entries[0].decision.is_blocked());
    }

    #[tokio::test]
    async fn blocks_buy_without_stop_loss() {
        let (use_case, audit) = use_case(InMemorySnapshotProvider::new(account(), Vec::new()));

        let report = use_case.execute(buy_request(None)).await.unwrap();

        assert!(!report.is_approved());
        assert_eq!(
            report.blocking_reasons,
            vec!["Stop loss is required for all BUY orders"]
        );
        assert!(audit.entries()[0].decision.is_blocked());
    }

    #[tokio::test]
    async fn invalid_intent_is_not_evaluated() {
        let (use_case, audit) = use_case(InMemorySnapshotProvider::new(account(), Vec::new()));
        let mut request = buy_request(Some(dec!(140)));
        request.order.quantity = 0;

        let Err(err) = use_case.execute(request).await else {
            panic!("expected invalid intent");
        };
        assert_eq!(err.code(), ErrorCode::InvalidIntent);
        assert!(audit.is_empty());
    }

    #[tokio::test]
    async fn snapshot_failure_propagates() {
        let use_case = EvaluateOrderUseCase::new(
            Arc::new(RiskEvaluationService::default()),
            Arc::new(OfflineSnapshots),
            Arc::new(InMemoryAuditTrail::new()),
        );

        let Err(err) = use_case.execute(buy_request(Some(dec!(140)))).await else {
            panic!("expected snapshot failure");
        };
        assert_eq!(err.code(), ErrorCode::SnapshotUnavailable);
    }

    #[tokio::test]
    async fn audit_failure_fails_closed() {
        let use_case = EvaluateOrderUseCase::new(
            Arc::new(RiskEvaluationService::default()),
            Arc::new(InMemorySnapshotProvider::new(account(), Vec::new())),
            Arc::new(FailingAudit),
        );

        let Err(err) = use_case.execute(buy_request(Some(dec!(140)))).await else {
            panic!("expected audit failure");
        };
        assert_eq!(err.code(), ErrorCode::AuditFailed);
    }

    #[tokio::test]
    async fn reads_latest_snapshot_each_time() {
        let provider = InMemorySnapshotProvider::new(account(), Vec::new());
        let (use_case, _audit) = use_case(provider);
        assert!(use_case.execute(buy_request(Some(dec!(140)))).await.unwrap().is_approved());

        use_case.snapshots.set_account(AccountSnapshot::new(
            Money::from_units(100_000),
            Money::from_units(10_000),
            Money::ZERO,
        ));
        let report = use_case.execute(buy_request(Some(dec!(140)))).await.unwrap();
        assert_eq!(report.blocking_reasons, vec!["Margin trading is not allowed"]);
    }

    #[tokio::test]
    async fn reads_snapshot_once_per_evaluation() {
        let snapshots = Arc::new(ShiftingSnapshots {
            reads: AtomicUsize::new(0),
        });
        let use_case = EvaluateOrderUseCase::new(
            Arc::new(RiskEvaluationService::default()),
            Arc::clone(&snapshots),
            Arc::new(InMemoryAuditTrail::new()),
        );

        let report = use_case.execute(buy_request(Some(dec!(140)))).await.unwrap();
        assert_eq!(snapshots.reads.load(Ordering::SeqCst), 1);
        assert!(report.is_approved());

        let report = use_case.execute(buy_request(Some(dec!(140)))).await.unwrap();
        assert_eq!(snapshots.reads.load(Ordering::SeqCst), 2);
        assert!(!report.is_approved());
    }

    #[tokio::test]
    async fn custom_config_relaxes_stop_loss() {
        let config = RiskConfig {
            require_stop_loss: false,
            ..RiskConfig::default()
        };
        let use_case = EvaluateOrderUseCase::new(
            Arc::new(RiskEvaluationService::new(config).unwrap()),
            Arc::new(InMemorySnapshotProvider::new(account(), Vec::new())),
            Arc::new(InMemoryAuditTrail::new()),
        );

        let report = use_case.execute(buy_request(None)).await.unwrap();
        assert!(report.is_approved());
    }
}
