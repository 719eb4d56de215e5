// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::items_after_statements,
        clippy::unreadable_literal
    )
)]

//! Risk Gate - Pre-Trade Risk Engine
//!
//! Evaluates a proposed order against an account snapshot and the open
//! position book, returning one graded result per applicable rule. The order
//! is rejected if any result blocks; warnings are surfaced but never reject.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure rule evaluation, no I/O and no logging
//!   - `risk_management`: Rule catalog, evaluation pipeline, severity resolver
//!   - `shared`: Money, symbols, identifiers, timestamps
//!
//! - **Application**: Orchestration around one evaluation
//!   - `ports`: `SnapshotProviderPort`, `AuditTrailPort`
//!   - `use_cases`: `EvaluateOrder`
//!   - `dto`: Order requests, risk reports, audit entries
//!
//! - **Infrastructure**: Adapters
//!   - `snapshot`: JSON file provider, broker account-tag builder
//!   - `audit`: Structured tracing audit trail
//!
//! # Example
//!
//! ```rust,ignore
//! use risk_gate::{RiskEvaluationService, OrderIntent, OrderAction, Operation, Money};
//!
//! let service = RiskEvaluationService::default();
//! let intent = OrderIntent::stock("AAPL", OrderAction::Buy, 10)
//!     .with_limit_price(Money::from_units(150))
//!     .with_stop_loss(Money::from_units(140));
//! let results = service.evaluate(Operation::PlaceOrder, &intent, &account, &positions);
//! assert!(!risk_gate::has_blocking_issues(&results));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Crate-level errors.
pub mod error;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::risk_management::errors::RiskError;
pub use domain::risk_management::services::{
    RiskEvaluationService, aggregate_severity, blocking_reasons, get_warnings,
    has_blocking_issues,
};
pub use domain::risk_management::value_objects::{
    AccountSnapshot, CheckName, CheckResult, ContractType, DetailValue, Operation,
    OptionDetails, OptionRight, OrderAction, OrderIntent, PositionRecord, RiskConfig,
    RiskDecision, RiskLevel, SecurityType,
};
pub use domain::shared::{EvaluationId, Money, Symbol, Timestamp};

// Application re-exports
pub use application::dto::{
    CheckResultDto, EvaluateOrderRequestDto, OrderIntentDto, RiskAuditEntry, RiskReportDto,
};
pub use application::ports::{
    AuditError, AuditTrailPort, InMemoryAuditTrail, InMemorySnapshotProvider, PortfolioSnapshot,
    SnapshotError, SnapshotProviderPort,
};
pub use application::use_cases::EvaluateOrderUseCase;

// Infrastructure re-exports
pub use infrastructure::{FileSnapshotProvider, TracingAuditTrail, account_snapshot_from_tags};

// Cross-cutting re-exports
pub use config::{Config, ConfigError, load_config};
pub use error::{ErrorCode, GateError};
