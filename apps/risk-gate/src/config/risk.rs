//! Risk threshold configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::risk_management::value_objects::RiskConfig;
use crate::domain::shared::Symbol;

use super::ConfigError;

/// Risk thresholds as written in the config file.
///
/// Percentages are in percent points (20.0 = 20%).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSettings {
    /// Largest single-symbol exposure.
    #[serde(default = "default_max_single_position_pct")]
    pub max_single_position_pct: f64,
    /// Largest aggregate exposure.
    #[serde(default = "default_max_total_position_pct")]
    pub max_total_position_pct: f64,
    /// Drawdown beyond which a sell is flagged.
    #[serde(default = "default_max_drawdown_pct")]
    pub max_drawdown_pct: f64,
    /// Largest aggregate option exposure.
    #[serde(default = "default_max_option_position_pct")]
    pub max_option_position_pct: f64,
    /// Whether margin use is permitted.
    #[serde(default)]
    pub allow_margin: bool,
    /// Whether stock buys must carry a stop loss.
    #[serde(default = "default_true")]
    pub require_stop_loss: bool,
    /// Sector exposure above which a warning is raised.
    #[serde(default = "default_sector_concentration_warning_pct")]
    pub sector_concentration_warning_pct: f64,
    /// Implied volatility above which a warning is raised.
    #[serde(default = "default_high_volatility_threshold_pct")]
    pub high_volatility_threshold_pct: f64,
    /// Average daily volume below which a warning is raised.
    #[serde(default = "default_min_liquidity_volume")]
    pub min_liquidity_volume: u64,
    /// Haircut applied to bond-equivalent collateral.
    #[serde(default = "default_bond_collateral_multiplier")]
    pub bond_collateral_multiplier: f64,
    /// Symbols always treated as bond equivalents.
    #[serde(default = "default_bond_equivalent_symbols")]
    pub bond_equivalent_symbols: Vec<String>,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            max_single_position_pct: default_max_single_position_pct(),
            max_total_position_pct: default_max_total_position_pct(),
            max_drawdown_pct: default_max_drawdown_pct(),
            max_option_position_pct: default_max_option_position_pct(),
            allow_margin: false,
            require_stop_loss: true,
            sector_concentration_warning_pct: default_sector_concentration_warning_pct(),
            high_volatility_threshold_pct: default_high_volatility_threshold_pct(),
            min_liquidity_volume: default_min_liquidity_volume(),
            bond_collateral_multiplier: default_bond_collateral_multiplier(),
            bond_equivalent_symbols: default_bond_equivalent_symbols(),
        }
    }
}

impl RiskSettings {
    /// Convert to the domain thresholds.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if a value is not a finite number.
    pub fn to_risk_config(&self) -> Result<RiskConfig, ConfigError> {
        Ok(RiskConfig {
            max_single_position_pct: to_decimal(
                "max_single_position_pct",
                self.max_single_position_pct,
            )?,
            max_total_position_pct: to_decimal("max_total_position_pct", self.max_total_position_pct)?,
            max_drawdown_pct: to_decimal("max_drawdown_pct", self.max_drawdown_pct)?,
            max_option_position_pct: to_decimal(
                "max_option_position_pct",
                self.max_option_position_pct,
            )?,
            allow_margin: self.allow_margin,
            require_stop_loss: self.require_stop_loss,
            sector_concentration_warning_pct: to_decimal(
                "sector_concentration_warning_pct",
                self.sector_concentration_warning_pct,
            )?,
            high_volatility_threshold_pct: to_decimal(
                "high_volatility_threshold_pct",
                self.high_volatility_threshold_pct,
            )?,
            min_liquidity_volume: self.min_liquidity_volume,
            bond_collateral_multiplier: to_decimal(
                "bond_collateral_multiplier",
                self.bond_collateral_multiplier,
            )?,
            bond_equivalent_symbols: self
                .bond_equivalent_symbols
                .iter()
                .map(Symbol::new)
                .collect(),
        })
    }
}

fn to_decimal(field: &str, value: f64) -> Result<Decimal, ConfigError> {
    Decimal::try_from(value)
        .map(|d| d.normalize())
        .map_err(|_| ConfigError::ValidationError(format!("risk.{field} must be a finite number")))
}

const fn default_max_single_position_pct() -> f64 {
    20.0
}

const fn default_max_total_position_pct() -> f64 {
    85.0
}

const fn default_max_drawdown_pct() -> f64 {
    10.0
}

const fn default_max_option_position_pct() -> f64 {
    10.0
}

const fn default_true() -> bool {
    true
}

const fn default_sector_concentration_warning_pct() -> f64 {
    30.0
}

const fn default_high_volatility_threshold_pct() -> f64 {
    50.0
}

const fn default_min_liquidity_volume() -> u64 {
    100_000
}

const fn default_bond_collateral_multiplier() -> f64 {
    0.95
}

fn default_bond_equivalent_symbols() -> Vec<String> {
    vec!["SGOV".to_string(), "BIL".to_string(), "SHV".to_string()]
}
