//! Option-specific rules: position limit, naked calls, short-put collateral.

use rust_decimal::Decimal;

use super::rule_catalog::{ExposureError, VALUE_OUT_OF_RANGE, percent_of_account};
use crate::domain::risk_management::value_objects::{
    CONTRACT_MULTIPLIER, CheckName, CheckResult, EvaluationContext, OptionDetails, OptionRight,
    OrderAction, PositionRecord,
};
use crate::domain::shared::Money;

/// Run the option group. Returns a single blocking result when the intent
/// carries no contract details.
#[must_use]
pub fn check_option_risks(ctx: &EvaluationContext<'_>) -> Vec<CheckResult> {
    let Some(details) = ctx.intent.option_details.as_ref() else {
        return vec![CheckResult::block(
            CheckName::OptionDetails,
            "Option details required for option trading",
        )];
    };

    let mut results = vec![check_option_position_limit(ctx, details)];

    match (ctx.intent.action, details.right) {
        (OrderAction::Sell, OptionRight::Call) => results.push(check_naked_call(ctx)),
        (OrderAction::Sell, OptionRight::Put) => {
            results.push(check_naked_put_collateral(ctx, details));
        }
        (OrderAction::Buy, _) => {}
    }

    results
}

/// Aggregate option exposure after the order, premium × 100 per contract.
#[must_use]
pub fn check_option_position_limit(
    ctx: &EvaluationContext<'_>,
    details: &OptionDetails,
) -> CheckResult {
    let option_pct = match option_value_after(ctx, details)
        .ok_or(ExposureError::OutOfRange)
        .and_then(|value| percent_of_account(value, ctx.account.net_liquidation))
    {
        Ok(pct) => pct,
        Err(e) => return CheckResult::block(CheckName::OptionPositionLimit, e.message()),
    };
    let limit = ctx.config.max_option_position_pct;

    if option_pct > limit {
        return CheckResult::block(
            CheckName::OptionPositionLimit,
            format!("Option position would exceed limit: {option_pct:.1}% > {limit}%"),
        )
        .with_detail("option_pct", option_pct)
        .with_detail("limit_pct", limit);
    }

    CheckResult::pass(
        CheckName::OptionPositionLimit,
        format!("Option position OK: {option_pct:.1}%"),
    )
    .with_detail("option_pct", option_pct)
}

fn option_value_after(ctx: &EvaluationContext<'_>, details: &OptionDetails) -> Option<Money> {
    let current = Money::checked_sum(
        ctx.positions
            .iter()
            .filter(|p| p.is_option())
            .map(PositionRecord::abs_cost_value),
    )?;
    let order_value = details
        .price
        .checked_mul(ctx.intent.quantity_decimal() * CONTRACT_MULTIPLIER)?;
    current.checked_add(order_value)
}

/// Short calls must be fully covered by shares of the underlying.
#[must_use]
pub fn check_naked_call(ctx: &EvaluationContext<'_>) -> CheckResult {
    let required_shares = covering_shares(ctx.intent.quantity);
    let covering = ctx.positions.iter().find(|p| {
        p.is_stock() && p.symbol == ctx.intent.symbol && p.quantity >= required_shares
    });

    match covering {
        Some(position) => CheckResult::pass(
            CheckName::CoveredCall,
            "Covered call: sufficient underlying shares owned",
        )
        .with_detail("required_shares", required_shares)
        .with_detail("shares_owned", position.quantity),
        None => CheckResult::block(
            CheckName::NakedCall,
            "Naked call selling is prohibited. Must own underlying shares for covered call.",
        )
        .with_detail("required_shares", required_shares),
    }
}

/// Short puts need cash, or discounted bond equivalents, to cover assignment.
#[must_use]
pub fn check_naked_put_collateral(
    ctx: &EvaluationContext<'_>,
    details: &OptionDetails,
) -> CheckResult {
    let cash = ctx.account.cash_balance;
    let required = details
        .strike
        .checked_mul(ctx.intent.quantity_decimal() * CONTRACT_MULTIPLIER);
    let (Some(required), Some((bond_value, available))) = (required, put_collateral(ctx)) else {
        return CheckResult::block(CheckName::NakedPutCollateral, VALUE_OUT_OF_RANGE);
    };

    if available < required {
        return CheckResult::block(
            CheckName::NakedPutCollateral,
            format!("Insufficient collateral for naked put: {available} < {required}"),
        )
        .with_detail("available", available)
        .with_detail("required", required)
        .with_detail("cash", cash)
        .with_detail("bond_value", bond_value);
    }

    CheckResult::pass(
        CheckName::NakedPutCollateral,
        format!("Sufficient collateral for naked put: {available}"),
    )
    .with_detail("available", available)
    .with_detail("required", required)
}

/// Bond-equivalent value and the total collateral it supports with cash.
fn put_collateral(ctx: &EvaluationContext<'_>) -> Option<(Money, Money)> {
    let bond_value = Money::checked_sum(
        ctx.positions
            .iter()
            .filter(|p| ctx.config.is_bond_equivalent(p))
            .map(PositionRecord::abs_cost_value),
    )?;
    let discounted = bond_value.checked_mul(ctx.config.bond_collateral_multiplier)?;
    let available = ctx.account.cash_balance.checked_add(discounted)?;
    Some((bond_value, available))
}

/// Shares needed to cover `contracts` short calls.
#[must_use]
pub fn covering_shares(contracts: u32) -> Decimal {
    Decimal::from(contracts) * CONTRACT_MULTIPLIER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk_management::value_objects::{
        AccountSnapshot, ContractType, DetailValue, OrderIntent, PositionRecord, RiskConfig,
        RiskLevel,
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn details(right: OptionRight, strike: i64, premium: Decimal) -> OptionDetails {
        OptionDetails::new(
            right,
            Money::from_units(strike),
            NaiveDate::from_ymd_opt(2026, 12, 18).unwrap(),
            Money::new(premium),
        )
    }

    fn account(net_liquidation: i64, cash: i64) -> AccountSnapshot {
        AccountSnapshot::new(
            Money::from_units(net_liquidation),
            Money::from_units(net_liquidation),
            Money::from_units(cash),
        )
    }

    #[test]
    fn missing_details_short_circuits() {
        let mut intent = OrderIntent::stock("AAPL", OrderAction::Sell, 1);
        intent.contract_type = ContractType::Option;
        let acct = account(100_000, 100_000);
        let config = RiskConfig::default();
        let ctx = EvaluationContext::new(&intent, &acct, &[], &config);

        let results = check_option_risks(&ctx);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), CheckName::OptionDetails);
        assert!(results[0].is_blocking());
    }

    #[test]
    fn buy_option_runs_only_position_limit() {
        let intent = OrderIntent::option("AAPL", OrderAction::Buy, 2, details(OptionRight::Call, 150, dec!(5)));
        let acct = account(100_000, 100_000);
        let config = RiskConfig::default();
        let ctx = EvaluationContext::new(&intent, &acct, &[], &config);

        let results = check_option_risks(&ctx);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), CheckName::OptionPositionLimit);
        // 2 × 5 × 100 = 1 000 → 1%
        assert_eq!(results[0].detail("option_pct"), Some(&DetailValue::Amount(dec!(1))));
    }

    #[test]
    fn option_limit_counts_existing_option_positions() {
        let intent = OrderIntent::option("SPY", OrderAction::Buy, 1, details(OptionRight::Put, 450, dec!(10)));
        let acct = account(100_000, 100_000);
        let positions = vec![
            PositionRecord::option("QQQ", OptionRight::Call, dec!(-3), Money::from_units(3000)),
            PositionRecord::stock("SPY", dec!(100), Money::from_units(450)),
        ];
        let config = RiskConfig::default();
        let ctx = EvaluationContext::new(&intent, &acct, &positions, &config);

        // 9 000 + 1 000 = 10% is not above 10
        let result = check_option_position_limit(&ctx, intent.option_details.as_ref().unwrap());
        assert_eq!(result.level(), RiskLevel::Pass);

        let intent = OrderIntent::option("SPY", OrderAction::Buy, 2, details(OptionRight::Put, 450, dec!(10)));
        let ctx = EvaluationContext::new(&intent, &acct, &positions, &config);
        let result = check_option_position_limit(&ctx, intent.option_details.as_ref().unwrap());
        assert!(result.is_blocking());
    }

    #[test]
    fn option_limit_zero_account_value_blocks() {
        let intent = OrderIntent::option("AAPL", OrderAction::Buy, 1, details(OptionRight::Call, 150, dec!(1)));
        let acct = AccountSnapshot::default();
        let config = RiskConfig::default();
        let ctx = EvaluationContext::new(&intent, &acct, &[], &config);

        let results = check_option_risks(&ctx);
        assert!(results[0].is_blocking());
        assert_eq!(results[0].message(), ExposureError::AccountValueUnknown.message());
    }

    #[test]
    fn covered_call_passes_with_enough_shares() {
        let intent = OrderIntent::option("SYM", OrderAction::Sell, 1, details(OptionRight::Call, 50, dec!(1)));
        let acct = account(100_000, 100_000);
        let positions = vec![PositionRecord::stock("SYM", dec!(100), Money::from_units(45))];
        let config = RiskConfig::default();
        let ctx = EvaluationContext::new(&intent, &acct, &positions, &config);

        let result = check_naked_call(&ctx);
        assert_eq!(result.name(), CheckName::CoveredCall);
        assert_eq!(result.level(), RiskLevel::Pass);
        assert_eq!(result.message(), "Covered call: sufficient underlying shares owned");
    }

    #[test]
    fn naked_call_blocks_without_shares() {
        let intent = OrderIntent::option("SYM", OrderAction::Sell, 1, details(OptionRight::Call, 50, dec!(1)));
        let acct = account(100_000, 100_000);
        let config = RiskConfig::default();
        let ctx = EvaluationContext::new(&intent, &acct, &[], &config);

        let result = check_naked_call(&ctx);
        assert_eq!(result.name(), CheckName::NakedCall);
        assert!(result.is_blocking());
        assert_eq!(result.detail("required_shares"), Some(&DetailValue::Amount(dec!(100))));
    }

    #[test]
    fn partial_cover_is_still_naked() {
        let intent = OrderIntent::option("SYM", OrderAction::Sell, 2, details(OptionRight::Call, 50, dec!(1)));
        let acct = account(100_000, 100_000);
        let positions = vec![
            PositionRecord::stock("SYM", dec!(150), Money::from_units(45)),
            PositionRecord::option("SYM", OptionRight::Call, dec!(5), Money::from_units(100)),
        ];
        let config = RiskConfig::default();
        let ctx = EvaluationContext::new(&intent, &acct, &positions, &config);
        assert!(check_naked_call(&ctx).is_blocking());
    }

    #[test]
    fn naked_put_without_collateral_blocks() {
        let intent = OrderIntent::option("SYM", OrderAction::Sell, 1, details(OptionRight::Put, 100, dec!(2)));
        let acct = account(100_000, 5_000);
        let config = RiskConfig::default();
        let ctx = EvaluationContext::new(&intent, &acct, &[], &config);

        let results = check_option_risks(&ctx);
        let collateral = results
            .iter()
            .find(|r| r.name() == CheckName::NakedPutCollateral)
            .unwrap();
        assert!(collateral.is_blocking());
        assert_eq!(
            collateral.message(),
            "Insufficient collateral for naked put: $5000.00 < $10000.00"
        );
        assert_eq!(
            collateral.detail("required"),
            Some(&DetailValue::from(Money::from_units(10_000)))
        );
    }

    #[test]
    fn bond_equivalents_count_at_haircut() {
        let intent = OrderIntent::option("SYM", OrderAction::Sell, 1, details(OptionRight::Put, 100, dec!(2)));
        let acct = account(100_000, 5_000);
        let config = RiskConfig::default();

        // 5 000 + 5 000 × 0.95 = 9 750 < 10 000
        let positions = vec![PositionRecord::stock("SGOV", dec!(50), Money::from_units(100))];
        let ctx = EvaluationContext::new(&intent, &acct, &positions, &config);
        assert!(check_naked_put_collateral(&ctx, intent.option_details.as_ref().unwrap()).is_blocking());

        // 5 000 + 6 000 × 0.95 = 10 700 ≥ 10 000
        let positions = vec![
            PositionRecord::stock("USFR", dec!(60), Money::from_units(100)).with_bond_equivalent(true),
        ];
        let ctx = EvaluationContext::new(&intent, &acct, &positions, &config);
        let result = check_naked_put_collateral(&ctx, intent.option_details.as_ref().unwrap());
        assert_eq!(result.level(), RiskLevel::Pass);
        assert_eq!(result.detail("available"), Some(&DetailValue::Amount(dec!(10700))));
    }

    #[test]
    fn oversized_premium_blocks_instead_of_overflowing() {
        let huge = OptionDetails::new(
            OptionRight::Call,
            Money::from_units(150),
            NaiveDate::from_ymd_opt(2026, 12, 18).unwrap(),
            Money::new(Decimal::MAX / Decimal::TWO),
        );
        let intent = OrderIntent::option("AAPL", OrderAction::Buy, 10, huge);
        let acct = account(100_000, 100_000);
        let config = RiskConfig::default();
        let ctx = EvaluationContext::new(&intent, &acct, &[], &config);

        let results = check_option_risks(&ctx);
        assert_eq!(results[0].name(), CheckName::OptionPositionLimit);
        assert!(results[0].is_blocking());
        assert_eq!(results[0].message(), VALUE_OUT_OF_RANGE);
    }

    #[test]
    fn oversized_strike_blocks_put_collateral() {
        let huge = OptionDetails::new(
            OptionRight::Put,
            Money::new(Decimal::MAX / Decimal::TWO),
            NaiveDate::from_ymd_opt(2026, 12, 18).unwrap(),
            Money::from_units(1),
        );
        let intent = OrderIntent::option("SYM", OrderAction::Sell, 1, huge);
        let acct = account(100_000, 100_000);
        let config = RiskConfig::default();
        let ctx = EvaluationContext::new(&intent, &acct, &[], &config);

        let result = check_naked_put_collateral(&ctx, intent.option_details.as_ref().unwrap());
        assert!(result.is_blocking());
        assert_eq!(result.message(), VALUE_OUT_OF_RANGE);
    }

    #[test]
    fn covering_shares_per_contract() {
        assert_eq!(covering_shares(3), dec!(300));
    }
}
