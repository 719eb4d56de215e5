//! Infrastructure Layer
//!
//! Adapters implementing the ports defined in the application layer:
//!
//! - `snapshot/`: Account and position sources (JSON file, broker tag rows)
//! - `audit/`: Decision sinks (structured tracing events)

pub mod audit;
pub mod snapshot;

pub use audit::TracingAuditTrail;
pub use snapshot::{FileSnapshotProvider, account_snapshot_from_tags};
