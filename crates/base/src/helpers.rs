use anyhow::{Context, Result};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::entities::{MoneyValue, MONEY_DECIMAL_PLACES};

/// Rounds a value to cents, midpoints going away from zero.
pub fn round_money(value: Decimal) -> MoneyValue {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Fixed two-decimal representation used at every display boundary.
pub fn format_money(value: Decimal) -> String {
    let mut rounded = round_money(value);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded.to_string()
}

/// `unit_price * quantity * (1 - discount)` with overflow reported as an error.
pub fn discounted_total(
    unit_price: Decimal,
    quantity: Decimal,
    discount: Decimal,
) -> Result<Decimal> {
    let multiplier = Decimal::ONE
        .checked_sub(discount)
        .context(format!("discount {} overflows the multiplier", discount))?;

    unit_price
        .checked_mul(quantity)
        .and_then(|gross| gross.checked_mul(multiplier))
        .context(format!(
            "overflow on calculating total of {} units at {} with discount {}",
            quantity, unit_price, discount
        ))
}

pub fn percent(fraction: Decimal) -> Result<Decimal> {
    fraction
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|value| value.normalize())
        .context(format!("overflow on converting {} to a percent", fraction))
}
