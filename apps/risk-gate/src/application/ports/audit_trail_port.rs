//! Audit Trail Port (Driven Port)
//!
//! Interface for recording every risk decision.

use async_trait::async_trait;
use thiserror::Error;

use crate::application::dto::RiskAuditEntry;

/// Errors from audit sinks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuditError {
    /// Entry could not be written.
    #[error("Failed to record audit entry: {message}")]
    WriteFailed {
        /// Error details.
        message: String,
    },
}

/// Port for persisting risk decisions.
#[async_trait]
pub trait AuditTrailPort: Send + Sync {
    /// Record one evaluation.
    async fn record(&self, entry: &RiskAuditEntry) -> Result<(), AuditError>;
}

/// In-memory implementation for testing.
#[derive(Debug, Default)]
pub struct InMemoryAuditTrail {
    entries: std::sync::RwLock<Vec<RiskAuditEntry>>,
}

impl InMemoryAuditTrail {
    /// Create an empty audit trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries recorded so far, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<RiskAuditEntry> {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of entries recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuditTrailPort for InMemoryAuditTrail {
    async fn record(&self, entry: &RiskAuditEntry) -> Result<(), AuditError> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.push(entry.clone());
        drop(entries);
        Ok(())
    }
}
