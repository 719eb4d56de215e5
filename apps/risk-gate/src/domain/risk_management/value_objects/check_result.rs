//! Check result types.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RiskLevel;
use crate::domain::shared::{Money, Symbol};

/// Identifier of the rule that produced a [`CheckResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CheckName {
    /// Stop loss present on stock buys.
    #[serde(rename = "stop_loss_check")]
    StopLoss,
    /// Margin usage.
    #[serde(rename = "margin_check")]
    Margin,
    /// Single-position concentration.
    #[serde(rename = "position_size_check")]
    PositionSize,
    /// Aggregate exposure.
    #[serde(rename = "total_position_check")]
    TotalPosition,
    /// Drawdown of an existing position being sold.
    #[serde(rename = "drawdown_check")]
    Drawdown,
    /// Implied volatility.
    #[serde(rename = "volatility_check")]
    Volatility,
    /// Average traded volume.
    #[serde(rename = "liquidity_check")]
    Liquidity,
    /// Exposure to one sector.
    #[serde(rename = "sector_concentration_check")]
    SectorConcentration,
    /// Option order carries its contract details.
    #[serde(rename = "option_details_check")]
    OptionDetails,
    /// Aggregate option exposure.
    #[serde(rename = "option_position_limit")]
    OptionPositionLimit,
    /// Short call without covering shares.
    #[serde(rename = "naked_call_check")]
    NakedCall,
    /// Short call fully covered by shares.
    #[serde(rename = "covered_call_check")]
    CoveredCall,
    /// Collateral behind a short put.
    #[serde(rename = "naked_put_collateral")]
    NakedPutCollateral,
}

impl CheckName {
    /// Stable string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StopLoss => "stop_loss_check",
            Self::Margin => "margin_check",
            Self::PositionSize => "position_size_check",
            Self::TotalPosition => "total_position_check",
            Self::Drawdown => "drawdown_check",
            Self::Volatility => "volatility_check",
            Self::Liquidity => "liquidity_check",
            Self::SectorConcentration => "sector_concentration_check",
            Self::OptionDetails => "option_details_check",
            Self::OptionPositionLimit => "option_position_limit",
            Self::NakedCall => "naked_call_check",
            Self::CoveredCall => "covered_call_check",
            Self::NakedPutCollateral => "naked_put_collateral",
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar diagnostic attached to a check result.
///
/// Serialized with an explicit `type` tag. Amounts are written as decimal
/// strings, so an untagged form could not tell `Text("100")` from an amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DetailValue {
    /// Boolean flag.
    Flag(bool),
    /// Whole number (shares, volume).
    Count(i64),
    /// Decimal amount or percentage.
    Amount(Decimal),
    /// Free text.
    Text(String),
}

impl From<bool> for DetailValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for DetailValue {
    fn from(value: i64) -> Self {
        Self::Count(value)
    }
}

impl From<u32> for DetailValue {
    fn from(value: u32) -> Self {
        Self::Count(i64::from(value))
    }
}

impl From<u64> for DetailValue {
    fn from(value: u64) -> Self {
        Self::Count(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<Decimal> for DetailValue {
    fn from(value: Decimal) -> Self {
        Self::Amount(value)
    }
}

impl From<Money> for DetailValue {
    fn from(value: Money) -> Self {
        Self::Amount(value.amount())
    }
}

impl From<&str> for DetailValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DetailValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&Symbol> for DetailValue {
    fn from(value: &Symbol) -> Self {
        Self::Text(value.as_str().to_string())
    }
}

impl fmt::Display for DetailValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(v) => write!(f, "{v}"),
            Self::Count(v) => write!(f, "{v}"),
            Self::Amount(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// Outcome of one rule.
///
/// Built once by the rule that owns it and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    name: CheckName,
    level: RiskLevel,
    message: String,
    #[serde(default)]
    details: BTreeMap<String, DetailValue>,
}

impl CheckResult {
    /// Create a new check result.
    #[must_use]
    pub fn new(name: CheckName, level: RiskLevel, message: impl Into<String>) -> Self {
        Self {
            name,
            level,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// Create a passing result.
    #[must_use]
    pub fn pass(name: CheckName, message: impl Into<String>) -> Self {
        Self::new(name, RiskLevel::Pass, message)
    }

    /// Create a warning result.
    #[must_use]
    pub fn warning(name: CheckName, message: impl Into<String>) -> Self {
        Self::new(name, RiskLevel::Warning, message)
    }

    /// Create a blocking result.
    #[must_use]
    pub fn block(name: CheckName, message: impl Into<String>) -> Self {
        Self::new(name, RiskLevel::Block, message)
    }

    /// Attach a diagnostic value.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<DetailValue>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Rule that produced this result.
    #[must_use]
    pub const fn name(&self) -> CheckName {
        self.name
    }

    /// Severity.
    #[must_use]
    pub const fn level(&self) -> RiskLevel {
        self.level
    }

    /// Human-readable explanation.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// All diagnostics, ordered by key.
    #[must_use]
    pub const fn details(&self) -> &BTreeMap<String, DetailValue> {
        &self.details
    }

    /// Look up one diagnostic.
    #[must_use]
    pub fn detail(&self, key: &str) -> Option<&DetailValue> {
        self.details.get(key)
    }

    /// Returns true if this result blocks the order.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        self.level.is_blocking()
    }

    /// Returns true if this result is a warning.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self.level, RiskLevel::Warning)
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.name, self.message)
    }
}
