//! Audit trail adapters.

mod tracing_audit;

pub use tracing_audit::{AUDIT_TARGET, TracingAuditTrail};
