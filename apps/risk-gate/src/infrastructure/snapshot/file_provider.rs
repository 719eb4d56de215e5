//! JSON file snapshot provider.
//!
//! Reads the account and positions from one JSON file read per call, so edits
//! to the file are picked up by the next evaluation:
//!
//! ```json
//! {
//!   "account": { "net_liquidation": 100000, "excess_liquidity": 90000, "cash_balance": 50000 },
//!   "positions": [
//!     { "symbol": "AAPL", "sec_type": "STK", "quantity": 100, "average_cost": 150 }
//!   ]
//! }
//! ```
//!
//! Instead of `account`, the file may carry raw broker rows under
//! `account_tags` (`[{"tag": "NetLiquidation", "value": "100000"}]`).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::account_tags::{AccountTag, account_snapshot_from_tags};
use crate::application::ports::{PortfolioSnapshot, SnapshotError, SnapshotProviderPort};
use crate::domain::risk_management::value_objects::{AccountSnapshot, PositionRecord};

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    account: Option<AccountSnapshot>,
    #[serde(default)]
    account_tags: Vec<AccountTag>,
    #[serde(default)]
    positions: Vec<PositionRecord>,
}

/// Snapshot provider backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileSnapshotProvider {
    path: PathBuf,
}

impl FileSnapshotProvider {
    /// Create a provider reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path being read.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<SnapshotFile, SnapshotError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SnapshotError::Unavailable {
                message: format!("{}: {e}", self.path.display()),
            }
        })?;

        let file: SnapshotFile =
            serde_json::from_str(&contents).map_err(|e| SnapshotError::Malformed {
                message: format!("{}: {e}", self.path.display()),
            })?;

        debug!(
            path = %self.path.display(),
            positions = file.positions.len(),
            "Loaded snapshot file"
        );

        Ok(file)
    }
}

#[async_trait]
impl SnapshotProviderPort for FileSnapshotProvider {
    async fn snapshot(&self) -> Result<PortfolioSnapshot, SnapshotError> {
        let file = self.load().await?;
        let account = match file.account {
            Some(account) => account,
            None => account_snapshot_from_tags(
                file.account_tags
                    .iter()
                    .map(|row| (row.tag.as_str(), row.value.as_str())),
            )?,
        };
        Ok(PortfolioSnapshot::new(account, file.positions))
    }
}
