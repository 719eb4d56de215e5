//! Application Ports (Driver and Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driven Ports** (Secondary/Outbound): How our application uses external systems

mod audit_trail_port;
mod snapshot_provider_port;

pub use audit_trail_port::{AuditError, AuditTrailPort, InMemoryAuditTrail};
pub use snapshot_provider_port::{
    InMemorySnapshotProvider, PortfolioSnapshot, SnapshotError, SnapshotProviderPort,
};
