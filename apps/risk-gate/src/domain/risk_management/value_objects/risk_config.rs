//! Risk thresholds.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::PositionRecord;
use crate::domain::risk_management::errors::RiskError;
use crate::domain::shared::Symbol;

/// Upper bound accepted for any percentage threshold.
const MAX_PCT: Decimal = dec!(1000);

/// Immutable thresholds consulted by every rule.
///
/// All percentages are in percent points (20 = 20%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Largest single-symbol exposure, percent of net liquidation.
    pub max_single_position_pct: Decimal,
    /// Largest aggregate exposure, percent of net liquidation.
    pub max_total_position_pct: Decimal,
    /// Drawdown beyond which a sell is flagged.
    pub max_drawdown_pct: Decimal,
    /// Largest aggregate option exposure, percent of net liquidation.
    pub max_option_position_pct: Decimal,
    /// Whether margin use is permitted.
    pub allow_margin: bool,
    /// Whether stock buys must carry a stop loss.
    pub require_stop_loss: bool,
    /// Sector exposure above which a warning is raised.
    pub sector_concentration_warning_pct: Decimal,
    /// Implied volatility above which a warning is raised.
    pub high_volatility_threshold_pct: Decimal,
    /// Average daily volume below which a warning is raised.
    pub min_liquidity_volume: u64,
    /// Haircut applied to bond-equivalent holdings counted as collateral.
    pub bond_collateral_multiplier: Decimal,
    /// Symbols always treated as bond equivalents.
    pub bond_equivalent_symbols: Vec<Symbol>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_single_position_pct: dec!(20),
            max_total_position_pct: dec!(85),
            max_drawdown_pct: dec!(10),
            max_option_position_pct: dec!(10),
            allow_margin: false,
            require_stop_loss: true,
            sector_concentration_warning_pct: dec!(30),
            high_volatility_threshold_pct: dec!(50),
            min_liquidity_volume: 100_000,
            bond_collateral_multiplier: dec!(0.95),
            bond_equivalent_symbols: ["SGOV", "BIL", "SHV"]
                .into_iter()
                .map(Symbol::from)
                .collect(),
        }
    }
}

impl RiskConfig {
    /// Validate thresholds once, before any evaluation.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidConfiguration` naming the first bad field.
    pub fn validate(&self) -> Result<(), RiskError> {
        let percentages = [
            ("max_single_position_pct", self.max_single_position_pct),
            ("max_total_position_pct", self.max_total_position_pct),
            ("max_drawdown_pct", self.max_drawdown_pct),
            ("max_option_position_pct", self.max_option_position_pct),
            (
                "sector_concentration_warning_pct",
                self.sector_concentration_warning_pct,
            ),
            (
                "high_volatility_threshold_pct",
                self.high_volatility_threshold_pct,
            ),
        ];

        for (field, value) in percentages {
            if value <= Decimal::ZERO || value > MAX_PCT {
                return Err(RiskError::configuration(
                    field,
                    format!("must be in (0, {MAX_PCT}], got {value}"),
                ));
            }
        }

        if self.bond_collateral_multiplier < Decimal::ZERO
            || self.bond_collateral_multiplier > Decimal::ONE
        {
            return Err(RiskError::configuration(
                "bond_collateral_multiplier",
                format!("must be in [0, 1], got {}", self.bond_collateral_multiplier),
            ));
        }

        for symbol in &self.bond_equivalent_symbols {
            symbol.validate().map_err(|e| {
                RiskError::configuration("bond_equivalent_symbols", e.to_string())
            })?;
        }

        Ok(())
    }

    /// Returns true if the position counts as cash-equivalent collateral.
    #[must_use]
    pub fn is_bond_equivalent(&self, position: &PositionRecord) -> bool {
        position.bond_equivalent || self.bond_equivalent_symbols.contains(&position.symbol)
    }
}
