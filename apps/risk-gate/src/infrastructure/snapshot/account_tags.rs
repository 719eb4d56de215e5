//! Account snapshot from broker account-summary tags.
//!
//! Brokers report account values as `(tag, value)` string pairs. Only the
//! three tags read by the rules are kept; everything else is ignored.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::ports::SnapshotError;
use crate::domain::risk_management::value_objects::AccountSnapshot;
use crate::domain::shared::Money;

/// Tag carrying the total account value.
pub const NET_LIQUIDATION_TAG: &str = "NetLiquidation";
/// Tag carrying equity above the maintenance requirement.
pub const EXCESS_LIQUIDITY_TAG: &str = "ExcessLiquidity";
/// Tag carrying settled cash.
pub const CASH_BALANCE_TAG: &str = "CashBalance";

/// One account-summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTag {
    /// Tag name.
    pub tag: String,
    /// Raw value.
    pub value: String,
}

impl AccountTag {
    /// Create a tag row.
    #[must_use]
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }
}

/// Build an account snapshot from tag/value pairs.
///
/// Missing tags default to zero. When a tag repeats, the last value wins.
///
/// # Errors
///
/// Returns `SnapshotError::InvalidTag` if a recognised tag carries a value
/// that is not a decimal number.
pub fn account_snapshot_from_tags<'a, I>(tags: I) -> Result<AccountSnapshot, SnapshotError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut snapshot = AccountSnapshot::default();

    for (tag, value) in tags {
        let slot = match tag {
            NET_LIQUIDATION_TAG => &mut snapshot.net_liquidation,
            EXCESS_LIQUIDITY_TAG => &mut snapshot.excess_liquidity,
            CASH_BALANCE_TAG => &mut snapshot.cash_balance,
            _ => continue,
        };
        *slot = parse_amount(tag, value)?;
    }

    Ok(snapshot)
}

fn parse_amount(tag: &str, value: &str) -> Result<Money, SnapshotError> {
    Decimal::from_str(value.trim())
        .or_else(|_| Decimal::from_scientific(value.trim()))
        .map(Money::new)
        .map_err(|_| SnapshotError::InvalidTag {
            tag: tag.to_string(),
            value: value.to_string(),
        })
}
