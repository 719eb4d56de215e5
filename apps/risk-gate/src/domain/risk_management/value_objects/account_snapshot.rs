//! Account values read by the risk rules.

use serde::{Deserialize, Serialize};

use crate::domain::shared::Money;

/// Point-in-time account values.
///
/// Missing broker tags are defaulted to zero by whoever builds the snapshot;
/// the rules never guess field presence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Total account value (cash plus positions).
    #[serde(default)]
    pub net_liquidation: Money,
    /// Equity in excess of the maintenance requirement.
    #[serde(default)]
    pub excess_liquidity: Money,
    /// Settled cash.
    #[serde(default)]
    pub cash_balance: Money,
}

impl AccountSnapshot {
    /// Create a new account snapshot.
    #[must_use]
    pub const fn new(net_liquidation: Money, excess_liquidity: Money, cash_balance: Money) -> Self {
        Self {
            net_liquidation,
            excess_liquidity,
            cash_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_snapshot_default_is_zero() {
        let snapshot = AccountSnapshot::default();
        assert!(snapshot.net_liquidation.is_zero());
        assert!(snapshot.excess_liquidity.is_zero());
        assert!(snapshot.cash_balance.is_zero());
    }

    #[test]
    fn account_snapshot_missing_fields_default() {
        let snapshot: AccountSnapshot =
            serde_json::from_str(r#"{"net_liquidation": 100000}"#).unwrap();
        assert_eq!(snapshot.net_liquidation, Money::from_units(100_000));
        assert!(snapshot.cash_balance.is_zero());
    }
}
