//! Snapshot Provider Port (Driven Port)
//!
//! Interface for reading account values and open positions at the moment a
//! decision is requested.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::risk_management::value_objects::{AccountSnapshot, PositionRecord};

/// Errors from snapshot providers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// Provider could not be reached or read.
    #[error("Snapshot source unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Snapshot payload could not be decoded.
    #[error("Malformed snapshot: {message}")]
    Malformed {
        /// Error details.
        message: String,
    },

    /// An account tag carried a non-numeric value.
    #[error("Invalid value for account tag {tag}: {value:?}")]
    InvalidTag {
        /// Tag name.
        tag: String,
        /// Raw value.
        value: String,
    },
}

/// Account values and open positions captured together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioSnapshot {
    /// Account values.
    pub account: AccountSnapshot,
    /// Open positions.
    pub positions: Vec<PositionRecord>,
}

impl PortfolioSnapshot {
    /// Bundle an account and its positions.
    #[must_use]
    pub const fn new(account: AccountSnapshot, positions: Vec<PositionRecord>) -> Self {
        Self { account, positions }
    }
}

/// Port for the account and position snapshot used by one evaluation.
///
/// Both halves come from a single read so the account always matches the
/// position book it is evaluated against.
#[async_trait]
pub trait SnapshotProviderPort: Send + Sync {
    /// Current account values and open positions.
    async fn snapshot(&self) -> Result<PortfolioSnapshot, SnapshotError>;
}

/// In-memory implementation for testing and dry runs.
#[derive(Debug, Default)]
pub struct InMemorySnapshotProvider {
    snapshot: std::sync::RwLock<PortfolioSnapshot>,
}

impl InMemorySnapshotProvider {
    /// Create a provider serving the given snapshot.
    #[must_use]
    pub fn new(account: AccountSnapshot, positions: Vec<PositionRecord>) -> Self {
        Self {
            snapshot: std::sync::RwLock::new(PortfolioSnapshot::new(account, positions)),
        }
    }

    /// Replace the account values and positions in one step.
    pub fn set_snapshot(&self, snapshot: PortfolioSnapshot) {
        *self.write() = snapshot;
    }

    /// Replace the account values.
    pub fn set_account(&self, account: AccountSnapshot) {
        self.write().account = account;
    }

    /// Replace the position book.
    pub fn set_positions(&self, positions: Vec<PositionRecord>) {
        self.write().positions = positions;
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, PortfolioSnapshot> {
        self.snapshot
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl SnapshotProviderPort for InMemorySnapshotProvider {
    async fn snapshot(&self) -> Result<PortfolioSnapshot, SnapshotError> {
        let snapshot = self
            .snapshot
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(snapshot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::Money;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn in_memory_default_is_empty() {
        let provider = InMemorySnapshotProvider::default();
        let snapshot = provider.snapshot().await.unwrap();
        assert!(snapshot.account.net_liquidation.is_zero());
        assert!(snapshot.positions.is_empty());
    }

    #[tokio::test]
    async fn in_memory_replace_snapshot() {
        let provider = InMemorySnapshotProvider::default();
        provider.set_account(AccountSnapshot::new(
            Money::from_units(100_000),
            Money::from_units(80_000),
            Money::from_units(20_000),
        ));
        provider.set_positions(vec![PositionRecord::stock(
            "AAPL",
            dec!(10),
            Money::from_units(150),
        )]);

        let snapshot = provider.snapshot().await.unwrap();
        assert_eq!(snapshot.account.cash_balance, Money::from_units(20_000));
        assert_eq!(snapshot.positions.len(), 1);
    }

    #[tokio::test]
    async fn set_snapshot_swaps_account_and_positions_together() {
        let provider = InMemorySnapshotProvider::new(
            AccountSnapshot::new(
                Money::from_units(100_000),
                Money::from_units(80_000),
                Money::from_units(20_000),
            ),
            vec![PositionRecord::stock("AAPL", dec!(10), Money::from_units(150))],
        );
        let before = provider.snapshot().await.unwrap();

        provider.set_snapshot(PortfolioSnapshot::new(
            AccountSnapshot::new(
                Money::from_units(50_000),
                Money::from_units(50_000),
                Money::from_units(50_000),
            ),
            Vec::new(),
        ));
        let after = provider.snapshot().await.unwrap();

        // A snapshot taken earlier is unaffected by the swap.
        assert_eq!(before.account.net_liquidation, Money::from_units(100_000));
        assert_eq!(before.positions.len(), 1);
        assert_eq!(after.account.net_liquidation, Money::from_units(50_000));
        assert!(after.positions.is_empty());
    }

    #[test]
    fn snapshot_error_display() {
        let err = SnapshotError::InvalidTag {
            tag: "NetLiquidation".to_string(),
            value: "n/a".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for account tag NetLiquidation: \"n/a\""
        );
    }
}
