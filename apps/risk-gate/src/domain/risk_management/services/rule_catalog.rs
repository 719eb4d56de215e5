//! Rule Catalog
//!
//! One pure function per risk dimension. Each reads the evaluation context and
//! returns exactly one [`CheckResult`]; business conditions are never errors.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::risk_management::value_objects::{
    CheckName, CheckResult, EvaluationContext, OrderAction, PositionRecord,
};
use crate::domain::shared::Money;

/// Excess liquidity below this fraction of net liquidation indicates margin use.
const MARGIN_EXCESS_RATIO: Decimal = dec!(0.5);

pub(crate) const ACCOUNT_VALUE_UNKNOWN: &str = "Cannot determine account value";

pub(crate) const VALUE_OUT_OF_RANGE: &str = "Order value out of range";

/// Why an exposure could not be expressed as a share of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExposureError {
    /// Net liquidation is zero.
    AccountValueUnknown,
    /// An amount overflowed the decimal range.
    OutOfRange,
}

impl ExposureError {
    pub(crate) const fn message(self) -> &'static str {
        match self {
            Self::AccountValueUnknown => ACCOUNT_VALUE_UNKNOWN,
            Self::OutOfRange => VALUE_OUT_OF_RANGE,
        }
    }
}

/// Stop loss must accompany every buy when configured.
#[must_use]
pub fn check_stop_loss(ctx: &EvaluationContext<'_>) -> CheckResult {
    if !ctx.config.require_stop_loss {
        return CheckResult::pass(CheckName::StopLoss, "Stop loss not required by configuration");
    }

    let intent = ctx.intent;
    match (intent.action, intent.stop_loss) {
        (OrderAction::Buy, None) => {
            CheckResult::block(CheckName::StopLoss, "Stop loss is required for all BUY orders")
                .with_detail("required", true)
                .with_detail("provided", false)
        }
        (_, Some(stop)) => {
            CheckResult::pass(CheckName::StopLoss, format!("Stop loss check passed: {stop}"))
                .with_detail("stop_loss", stop)
        }
        (OrderAction::Sell, None) => {
            CheckResult::pass(CheckName::StopLoss, "SELL order (no stop loss required)")
        }
    }
}

/// Flag accounts whose excess liquidity suggests borrowed funds.
#[must_use]
pub fn check_margin_usage(ctx: &EvaluationContext<'_>) -> CheckResult {
    if ctx.config.allow_margin {
        return CheckResult::pass(CheckName::Margin, "Margin trading allowed by configuration");
    }

    let excess = ctx.account.excess_liquidity;
    // A zero divisor still flags margin use when excess liquidity is below one half.
    let net_liquidation = if ctx.account.net_liquidation.is_zero() {
        Money::from_units(1)
    } else {
        ctx.account.net_liquidation
    };

    if excess < net_liquidation * MARGIN_EXCESS_RATIO {
        return CheckResult::block(CheckName::Margin, "Margin trading is not allowed")
            .with_detail("excess_liquidity", excess)
            .with_detail("net_liquidation", net_liquidation);
    }

    CheckResult::pass(CheckName::Margin, "No margin usage detected")
}

/// Single-symbol exposure after the order, as a share of net liquidation.
#[must_use]
pub fn check_position_size(ctx: &EvaluationContext<'_>) -> CheckResult {
    let net_liquidation = ctx.account.net_liquidation;
    let Some(new_value) = position_value_after(ctx) else {
        return CheckResult::block(CheckName::PositionSize, VALUE_OUT_OF_RANGE);
    };
    let position_pct = match percent_of_account(new_value, net_liquidation) {
        Ok(pct) => pct,
        Err(e) => return CheckResult::block(CheckName::PositionSize, e.message()),
    };
    let limit = ctx.config.max_single_position_pct;

    if position_pct > limit {
        return CheckResult::block(
            CheckName::PositionSize,
            format!("Position would exceed limit: {position_pct:.1}% > {limit}%"),
        )
        .with_detail("symbol", &ctx.intent.symbol)
        .with_detail("new_position_pct", position_pct)
        .with_detail("limit_pct", limit)
        .with_detail("new_value", new_value)
        .with_detail("net_liquidation", net_liquidation);
    }

    CheckResult::pass(
        CheckName::PositionSize,
        format!("Position size OK: {position_pct:.1}% of portfolio"),
    )
    .with_detail("position_pct", position_pct)
}

/// Existing symbol value moved by the order. Sells may go negative.
fn position_value_after(ctx: &EvaluationContext<'_>) -> Option<Money> {
    let existing = match ctx.matching_position() {
        Some(position) => position.abs_cost_value()?,
        None => Money::ZERO,
    };
    let order_value = ctx.intent.order_value()?;
    match ctx.intent.action {
        OrderAction::Buy => existing.checked_add(order_value),
        OrderAction::Sell => existing.checked_sub(order_value),
    }
}

/// Aggregate exposure across the book, including a buy's order value.
#[must_use]
pub fn check_total_exposure(ctx: &EvaluationContext<'_>) -> CheckResult {
    let total_pct = match book_value_after(ctx)
        .ok_or(ExposureError::OutOfRange)
        .and_then(|total| percent_of_account(total, ctx.account.net_liquidation))
    {
        Ok(pct) => pct,
        Err(e) => return CheckResult::block(CheckName::TotalPosition, e.message()),
    };
    let limit = ctx.config.max_total_position_pct;

    if total_pct > limit {
        return CheckResult::block(
            CheckName::TotalPosition,
            format!("Total position would exceed limit: {total_pct:.1}% > {limit}%"),
        )
        .with_detail("total_position_pct", total_pct)
        .with_detail("limit_pct", limit);
    }

    CheckResult::pass(
        CheckName::TotalPosition,
        format!("Total position OK: {total_pct:.1}% invested"),
    )
    .with_detail("total_position_pct", total_pct)
}

fn book_value_after(ctx: &EvaluationContext<'_>) -> Option<Money> {
    let mut total = Money::checked_sum(ctx.positions.iter().map(PositionRecord::abs_cost_value))?;
    if ctx.intent.is_buy() && ctx.intent.check_price().is_some() {
        total = total.checked_add(ctx.intent.order_value()?)?;
    }
    Some(total)
}

/// Advisory flag when selling a position below its drawdown limit.
#[must_use]
pub fn check_drawdown(ctx: &EvaluationContext<'_>) -> CheckResult {
    let Some(current_price) = ctx.intent.check_price() else {
        return CheckResult::pass(CheckName::Drawdown, "No price provided for drawdown check");
    };

    let limit = ctx.config.max_drawdown_pct;

    // Any row in the symbol that breaches is enough; zero-cost rows are skipped.
    let breach = ctx.matching_positions().find_map(|position| {
        let avg_cost = position.average_cost;
        let drawdown_pct = current_price.checked_sub(avg_cost)?.percent_of(avg_cost)?;
        (drawdown_pct < -limit).then_some((avg_cost, drawdown_pct))
    });

    match breach {
        Some((avg_cost, drawdown_pct)) => CheckResult::warning(
            CheckName::Drawdown,
            format!("Position exceeds max drawdown: {drawdown_pct:.1}% < -{limit}%"),
        )
        .with_detail("symbol", &ctx.intent.symbol)
        .with_detail("drawdown_pct", drawdown_pct)
        .with_detail("avg_cost", avg_cost)
        .with_detail("current_price", current_price),
        None => CheckResult::pass(CheckName::Drawdown, "Drawdown within acceptable limits"),
    }
}

/// Advisory flag for option trades with elevated implied volatility.
#[must_use]
pub fn check_volatility(ctx: &EvaluationContext<'_>) -> CheckResult {
    let iv = ctx
        .intent
        .option_details
        .as_ref()
        .and_then(|d| d.implied_volatility);
    let threshold = ctx.config.high_volatility_threshold_pct;

    match iv {
        Some(iv) if iv > threshold => CheckResult::warning(
            CheckName::Volatility,
            format!("High implied volatility detected: {iv:.1}% > {threshold}%"),
        )
        .with_detail("implied_volatility", iv),
        _ => CheckResult::pass(CheckName::Volatility, "Volatility check passed"),
    }
}

/// Advisory flag for thinly traded symbols. Passes when volume is unknown.
#[must_use]
pub fn check_liquidity(ctx: &EvaluationContext<'_>) -> CheckResult {
    let Some(volume) = ctx.intent.average_daily_volume else {
        return CheckResult::pass(
            CheckName::Liquidity,
            "Liquidity check passed (volume data unavailable)",
        );
    };
    let minimum = ctx.config.min_liquidity_volume;

    if volume < minimum {
        return CheckResult::warning(
            CheckName::Liquidity,
            format!("Low liquidity: average daily volume {volume} < {minimum}"),
        )
        .with_detail("average_daily_volume", volume)
        .with_detail("min_volume", minimum);
    }

    CheckResult::pass(
        CheckName::Liquidity,
        format!("Liquidity OK: average daily volume {volume}"),
    )
    .with_detail("average_daily_volume", volume)
}

/// Advisory flag for sector crowding. `None` when the intent has no sector.
#[must_use]
pub fn check_sector_concentration(ctx: &EvaluationContext<'_>) -> Option<CheckResult> {
    let sector = ctx.intent.sector.as_deref()?;

    let sector_pct = match sector_value_after(ctx, sector)
        .ok_or(ExposureError::OutOfRange)
        .and_then(|value| percent_of_account(value, ctx.account.net_liquidation))
    {
        Ok(pct) => pct,
        Err(ExposureError::AccountValueUnknown) => {
            return Some(CheckResult::pass(
                CheckName::SectorConcentration,
                "Sector exposure not computed: account value unknown",
            ));
        }
        Err(ExposureError::OutOfRange) => {
            return Some(
                CheckResult::warning(
                    CheckName::SectorConcentration,
                    format!("Sector exposure not computed: {VALUE_OUT_OF_RANGE}"),
                )
                .with_detail("sector", sector),
            );
        }
    };
    let limit = ctx.config.sector_concentration_warning_pct;

    let result = if sector_pct > limit {
        CheckResult::warning(
            CheckName::SectorConcentration,
            format!("Sector concentration high: {sector} at {sector_pct:.1}% > {limit}%"),
        )
        .with_detail("limit_pct", limit)
    } else {
        CheckResult::pass(
            CheckName::SectorConcentration,
            format!("Sector exposure OK: {sector} at {sector_pct:.1}%"),
        )
    };

    Some(
        result
            .with_detail("sector", sector)
            .with_detail("sector_pct", sector_pct),
    )
}

fn sector_value_after(ctx: &EvaluationContext<'_>, sector: &str) -> Option<Money> {
    let mut sector_value = Money::checked_sum(
        ctx.positions
            .iter()
            .filter(|p| {
                p.sector
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(sector))
            })
            .map(PositionRecord::abs_cost_value),
    )?;
    if ctx.intent.is_buy() {
        sector_value = sector_value.checked_add(ctx.intent.order_value()?)?;
    }
    Some(sector_value)
}

/// `value` as a percentage of net liquidation.
pub(crate) fn percent_of_account(
    value: Money,
    net_liquidation: Money,
) -> Result<Decimal, ExposureError> {
    if net_liquidation.is_zero() {
        return Err(ExposureError::AccountValueUnknown);
    }
    value
        .percent_of(net_liquidation)
        .ok_or(ExposureError::OutOfRange)
}
