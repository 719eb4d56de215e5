//! Proposed trading action submitted for evaluation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::{DomainError, Money, Symbol};

/// Shares controlled by one option contract.
pub const CONTRACT_MULTIPLIER: Decimal = Decimal::ONE_HUNDRED;

/// Direction of the proposed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderAction {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Kind of contract being traded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContractType {
    /// Common stock or ETF.
    #[default]
    #[serde(rename = "STK", alias = "STOCK")]
    Stock,
    /// Listed equity option.
    #[serde(rename = "OPT", alias = "OPTION")]
    Option,
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stock => write!(f, "STK"),
            Self::Option => write!(f, "OPT"),
        }
    }
}

/// Option right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionRight {
    /// Call option.
    #[serde(rename = "C", alias = "CALL")]
    Call,
    /// Put option.
    #[serde(rename = "P", alias = "PUT")]
    Put,
}

impl fmt::Display for OptionRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "C"),
            Self::Put => write!(f, "P"),
        }
    }
}

/// Contract terms of an option order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDetails {
    /// Call or put.
    pub right: OptionRight,
    /// Strike price per share.
    pub strike: Money,
    /// Expiration date.
    pub expiration: NaiveDate,
    /// Premium per share.
    pub price: Money,
    /// Implied volatility in percent points (65.0 = 65%).
    #[serde(default)]
    pub implied_volatility: Option<Decimal>,
}

impl OptionDetails {
    /// Create option details without an implied volatility reading.
    #[must_use]
    pub const fn new(right: OptionRight, strike: Money, expiration: NaiveDate, price: Money) -> Self {
        Self {
            right,
            strike,
            expiration,
            price,
            implied_volatility: None,
        }
    }

    /// Attach an implied volatility reading.
    #[must_use]
    pub const fn with_implied_volatility(mut self, iv: Decimal) -> Self {
        self.implied_volatility = Some(iv);
        self
    }

    fn validate(&self) -> Result<(), DomainError> {
        self.strike.validate_price("option_details.strike")?;
        if self.price.is_negative() {
            return Err(DomainError::invalid(
                "option_details.price",
                "premium cannot be negative",
            ));
        }
        if self.implied_volatility.is_some_and(|iv| iv.is_sign_negative()) {
            return Err(DomainError::invalid(
                "option_details.implied_volatility",
                "implied volatility cannot be negative",
            ));
        }
        Ok(())
    }
}

/// A proposed order, as the caller would submit it to the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIntent {
    /// Symbol to trade (underlying for options).
    pub symbol: Symbol,
    /// Buy or sell.
    pub action: OrderAction,
    /// Shares or contracts.
    pub quantity: u32,
    /// Limit price, absent for market orders.
    #[serde(default)]
    pub limit_price: Option<Money>,
    /// Protective stop price.
    #[serde(default)]
    pub stop_loss: Option<Money>,
    /// Last quote used to value market orders.
    #[serde(default)]
    pub reference_price: Option<Money>,
    /// Stock or option.
    #[serde(default)]
    pub contract_type: ContractType,
    /// Required for option orders.
    #[serde(default)]
    pub option_details: Option<OptionDetails>,
    /// Average daily traded volume of the symbol, when known.
    #[serde(default)]
    pub average_daily_volume: Option<u64>,
    /// Sector classification of the symbol, when known.
    #[serde(default)]
    pub sector: Option<String>,
}

impl OrderIntent {
    /// Create a stock order intent.
    #[must_use]
    pub fn stock(symbol: impl Into<Symbol>, action: OrderAction, quantity: u32) -> Self {
        Self {
            symbol: symbol.into(),
            action,
            quantity,
            limit_price: None,
            stop_loss: None,
            reference_price: None,
            contract_type: ContractType::Stock,
            option_details: None,
            average_daily_volume: None,
            sector: None,
        }
    }

    /// Create an option order intent.
    #[must_use]
    pub fn option(
        symbol: impl Into<Symbol>,
        action: OrderAction,
        quantity: u32,
        details: OptionDetails,
    ) -> Self {
        Self {
            contract_type: ContractType::Option,
            option_details: Some(details),
            ..Self::stock(symbol, action, quantity)
        }
    }

    /// Set the limit price.
    #[must_use]
    pub const fn with_limit_price(mut self, price: Money) -> Self {
        self.limit_price = Some(price);
        self
    }

    /// Set the stop loss.
    #[must_use]
    pub const fn with_stop_loss(mut self, price: Money) -> Self {
        self.stop_loss = Some(price);
        self
    }

    /// Set the reference quote used for market orders.
    #[must_use]
    pub const fn with_reference_price(mut self, price: Money) -> Self {
        self.reference_price = Some(price);
        self
    }

    /// Set the average daily volume.
    #[must_use]
    pub const fn with_average_daily_volume(mut self, volume: u64) -> Self {
        self.average_daily_volume = Some(volume);
        self
    }

    /// Set the sector classification.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Price used to value the order: the limit price, else the reference quote.
    #[must_use]
    pub fn check_price(&self) -> Option<Money> {
        self.limit_price.or(self.reference_price)
    }

    /// Quantity as a Decimal.
    #[must_use]
    pub fn quantity_decimal(&self) -> Decimal {
        Decimal::from(self.quantity)
    }

    /// `quantity × check price`, zero when no price is known.
    ///
    /// `None` when the product overflows.
    #[must_use]
    pub fn order_value(&self) -> Option<Money> {
        self.check_price()
            .map_or(Some(Money::ZERO), |price| price.checked_mul(self.quantity_decimal()))
    }

    /// Returns true for buy orders.
    #[must_use]
    pub const fn is_buy(&self) -> bool {
        matches!(self.action, OrderAction::Buy)
    }

    /// Returns true for sell orders.
    #[must_use]
    pub const fn is_sell(&self) -> bool {
        matches!(self.action, OrderAction::Sell)
    }

    /// Returns true for option contracts.
    #[must_use]
    pub const fn is_option(&self) -> bool {
        matches!(self.contract_type, ContractType::Option)
    }

    /// Validate the intent at the system boundary.
    ///
    /// Missing option details are not an error here; the option rules report
    /// them as a blocking result.
    ///
    /// # Errors
    ///
    /// Returns error if the symbol, quantity, or any price is invalid.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.symbol.validate()?;

        if self.quantity == 0 {
            return Err(DomainError::invalid("quantity", "quantity must be positive"));
        }

        if let Some(price) = &self.limit_price {
            price.validate_price("limit_price")?;
        }
        if let Some(price) = &self.stop_loss {
            price.validate_price("stop_loss")?;
        }
        if let Some(price) = &self.reference_price {
            price.validate_price("reference_price")?;
        }
        if let Some(details) = &self.option_details {
            details.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 12, 18).unwrap()
    }

    #[test]
    fn stock_intent_defaults() {
        let intent = OrderIntent::stock("aapl", OrderAction::Buy, 50);
        assert_eq!(intent.symbol.as_str(), "AAPL");
        assert_eq!(intent.contract_type, ContractType::Stock);
        assert!(intent.option_details.is_none());
        assert!(intent.is_buy());
        assert!(!intent.is_option());
    }

    #[test]
    fn option_intent_carries_details() {
        let details = OptionDetails::new(
            OptionRight::Put,
            Money::from_units(100),
            expiry(),
            Money::new(dec!(2.5)),
        );
        let intent = OrderIntent::option("SPY", OrderAction::Sell, 1, details);
        assert!(intent.is_option());
        assert!(intent.is_sell());
        assert_eq!(intent.option_details.unwrap().right, OptionRight::Put);
    }

    #[test]
    fn check_price_prefers_limit() {
        let intent = OrderIntent::stock("AAPL", OrderAction::Buy, 10)
            .with_reference_price(Money::from_units(149))
            .with_limit_price(Money::from_units(150));
        assert_eq!(intent.check_price(), Some(Money::from_units(150)));

        let market = OrderIntent::stock("AAPL", OrderAction::Buy, 10)
            .with_reference_price(Money::from_units(149));
        assert_eq!(market.check_price(), Some(Money::from_units(149)));
    }

    #[test]
    fn order_value_without_price_is_zero() {
        let intent = OrderIntent::stock("AAPL", OrderAction::Buy, 10);
        assert_eq!(intent.order_value(), Some(Money::ZERO));

        let priced = intent.with_limit_price(Money::from_units(150));
        assert_eq!(priced.order_value(), Some(Money::from_units(1500)));
    }

    #[test]
    fn order_value_overflow_is_none() {
        let intent = OrderIntent::stock("AAPL", OrderAction::Buy, 10)
            .with_limit_price(Money::new(Decimal::MAX / Decimal::TWO));
        assert_eq!(intent.order_value(), None);
    }

    #[test]
    fn validate_rejects_zero_quantity() {
        let intent = OrderIntent::stock("AAPL", OrderAction::Buy, 0);
        let err = intent.validate().unwrap_err();
        assert!(err.to_string().contains("quantity"));
    }

    #[test]
    fn validate_rejects_non_positive_prices() {
        let intent =
            OrderIntent::stock("AAPL", OrderAction::Buy, 1).with_limit_price(Money::ZERO);
        assert!(intent.validate().is_err());

        let intent =
            OrderIntent::stock("AAPL", OrderAction::Buy, 1).with_stop_loss(Money::from_units(-5));
        assert!(intent.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_option_terms() {
        let details = OptionDetails::new(OptionRight::Call, Money::ZERO, expiry(), Money::ZERO);
        let intent = OrderIntent::option("AAPL", OrderAction::Sell, 1, details);
        assert!(intent.validate().is_err());
    }

    #[test]
    fn validate_accepts_option_without_details() {
        let mut intent = OrderIntent::stock("AAPL", OrderAction::Sell, 1);
        intent.contract_type = ContractType::Option;
        assert!(intent.validate().is_ok());
    }

    #[test]
    fn intent_deserializes_broker_style_enums() {
        let json = r#"{
            "symbol": "spy",
            "action": "SELL",
            "quantity": 2,
            "contract_type": "OPT",
            "option_details": {
                "right": "PUT",
                "strike": "450",
                "expiration": "2026-12-18",
                "price": 3.1
            }
        }"#;
        let intent: OrderIntent = serde_json::from_str(json).unwrap();
        assert_eq!(intent.symbol.as_str(), "SPY");
        assert_eq!(intent.contract_type, ContractType::Option);
        let details = intent.option_details.unwrap();
        assert_eq!(details.right, OptionRight::Put);
        assert_eq!(details.strike, Money::from_units(450));
        assert_eq!(details.price.amount(), dec!(3.1));
    }
}
