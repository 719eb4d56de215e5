//! Read-only inputs of a single evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AccountSnapshot, OrderIntent, PositionRecord, RiskConfig};

/// Kind of trading operation being gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// New order submission. Runs the full catalog.
    #[default]
    PlaceOrder,
    /// Change to a working order. Runs only the option and drawdown groups.
    ModifyOrder,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlaceOrder => write!(f, "place_order"),
            Self::ModifyOrder => write!(f, "modify_order"),
        }
    }
}

/// Everything a rule may read. Borrowed, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// Proposed order.
    pub intent: &'a OrderIntent,
    /// Account values.
    pub account: &'a AccountSnapshot,
    /// Open positions.
    pub positions: &'a [PositionRecord],
    /// Thresholds.
    pub config: &'a RiskConfig,
}

impl<'a> EvaluationContext<'a> {
    /// Bundle evaluation inputs.
    #[must_use]
    pub const fn new(
        intent: &'a OrderIntent,
        account: &'a AccountSnapshot,
        positions: &'a [PositionRecord],
        config: &'a RiskConfig,
    ) -> Self {
        Self {
            intent,
            account,
            positions,
            config,
        }
    }

    /// Every position in the intent's symbol, in book order.
    ///
    /// Stock and option legs of one underlying share a symbol and all match.
    pub fn matching_positions(&self) -> impl Iterator<Item = &'a PositionRecord> + 'a {
        let intent = self.intent;
        self.positions.iter().filter(move |p| p.symbol == intent.symbol)
    }

    /// Position whose value stands for the symbol's existing exposure.
    ///
    /// When the book holds several rows for the symbol the last one wins.
    #[must_use]
    pub fn matching_position(&self) -> Option<&'a PositionRecord> {
        self.matching_positions().last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk_management::value_objects::{OptionRight, OrderAction, SecurityType};
    use crate::domain::shared::Money;
    use rust_decimal_macros::dec;

    fn mixed_book() -> Vec<PositionRecord> {
        vec![
            PositionRecord::stock("AAPL", dec!(100), Money::from_units(150)),
            PositionRecord::stock("MSFT", dec!(5), Money::from_units(400)),
            PositionRecord::option("AAPL", OptionRight::Call, dec!(-1), Money::from_units(300)),
        ]
    }

    #[test]
    fn matching_positions_ignore_security_type() {
        let positions = mixed_book();
        let account = AccountSnapshot::default();
        let config = RiskConfig::default();

        let stock = OrderIntent::stock("AAPL", OrderAction::Sell, 10);
        let ctx = EvaluationContext::new(&stock, &account, &positions, &config);
        let types: Vec<_> = ctx.matching_positions().map(|p| p.sec_type).collect();
        assert_eq!(types, vec![SecurityType::Stock, SecurityType::Option]);
    }

    #[test]
    fn matching_position_takes_last_row_for_symbol() {
        let positions = mixed_book();
        let account = AccountSnapshot::default();
        let config = RiskConfig::default();

        // A stock order still resolves to the option row listed after the stock.
        let stock = OrderIntent::stock("AAPL", OrderAction::Sell, 10);
        let ctx = EvaluationContext::new(&stock, &account, &positions, &config);
        let found = ctx.matching_position().unwrap();
        assert_eq!(found.sec_type, SecurityType::Option);
        assert_eq!(found.quantity, dec!(-1));
    }

    #[test]
    fn matching_position_absent() {
        let positions = vec![PositionRecord::stock("MSFT", dec!(5), Money::from_units(400))];
        let account = AccountSnapshot::default();
        let config = RiskConfig::default();
        let intent = OrderIntent::stock("AAPL", OrderAction::Buy, 10);
        let ctx = EvaluationContext::new(&intent, &account, &positions, &config);
        assert!(ctx.matching_position().is_none());
    }

    #[test]
    fn operation_serde() {
        let op: Operation = serde_json::from_str("\"modify_order\"").unwrap();
        assert_eq!(op, Operation::ModifyOrder);
        assert_eq!(Operation::default().to_string(), "place_order");
    }
}
