//! Open position as reported by the broker.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OptionRight;
use crate::domain::shared::{Money, Symbol};

/// Security type of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityType {
    /// Stock or ETF.
    #[serde(rename = "STK", alias = "STOCK")]
    Stock,
    /// Equity option.
    #[serde(rename = "OPT", alias = "OPTION")]
    Option,
    /// Futures, forex, bonds and anything else the broker reports.
    #[serde(
        rename = "OTHER",
        alias = "FUT",
        alias = "CASH",
        alias = "BOND",
        alias = "FOP",
        alias = "CFD",
        alias = "IND"
    )]
    Other,
}

/// One open position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Symbol (underlying for options).
    pub symbol: Symbol,
    /// Security type.
    pub sec_type: SecurityType,
    /// Signed quantity; negative means short.
    pub quantity: Decimal,
    /// Average cost per unit as reported by the broker.
    pub average_cost: Money,
    /// Option right, for option positions.
    #[serde(default)]
    pub right: Option<OptionRight>,
    /// Cash-equivalent holding usable as short-put collateral.
    #[serde(default)]
    pub bond_equivalent: bool,
    /// Sector classification, when known.
    #[serde(default)]
    pub sector: Option<String>,
}

impl PositionRecord {
    /// Create a stock position.
    #[must_use]
    pub fn stock(symbol: impl Into<Symbol>, quantity: Decimal, average_cost: Money) -> Self {
        Self {
            symbol: symbol.into(),
            sec_type: SecurityType::Stock,
            quantity,
            average_cost,
            right: None,
            bond_equivalent: false,
            sector: None,
        }
    }

    /// Create an option position.
    #[must_use]
    pub fn option(
        symbol: impl Into<Symbol>,
        right: OptionRight,
        quantity: Decimal,
        average_cost: Money,
    ) -> Self {
        Self {
            sec_type: SecurityType::Option,
            right: Some(right),
            ..Self::stock(symbol, quantity, average_cost)
        }
    }

    /// Mark as cash-equivalent collateral.
    #[must_use]
    pub const fn with_bond_equivalent(mut self, bond_equivalent: bool) -> Self {
        self.bond_equivalent = bond_equivalent;
        self
    }

    /// Set the sector classification.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Signed `quantity × average_cost`. `None` on overflow.
    #[must_use]
    pub fn cost_value(&self) -> Option<Money> {
        self.average_cost.checked_mul(self.quantity)
    }

    /// Absolute cost value, used by every exposure sum.
    #[must_use]
    pub fn abs_cost_value(&self) -> Option<Money> {
        self.cost_value().map(|v| v.abs())
    }

    /// Returns true for option positions.
    #[must_use]
    pub const fn is_option(&self) -> bool {
        matches!(self.sec_type, SecurityType::Option)
    }

    /// Returns true for stock positions.
    #[must_use]
    pub const fn is_stock(&self) -> bool {
        matches!(self.sec_type, SecurityType::Stock)
    }
}
