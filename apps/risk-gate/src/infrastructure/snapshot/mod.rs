//! Snapshot adapters.

mod account_tags;
mod file_provider;

pub use account_tags::{
    AccountTag, CASH_BALANCE_TAG, EXCESS_LIQUIDITY_TAG, NET_LIQUIDATION_TAG,
    account_snapshot_from_tags,
};
pub use file_provider::FileSnapshotProvider;
