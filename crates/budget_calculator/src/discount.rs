use rust_decimal::Decimal;

pub type DiscountFraction = Decimal;

pub const MAX_DISCOUNT_PERCENT: u32 = 50;
pub const DISCOUNT_STEP_PERCENT: u32 = 5;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DiscountOption {
    pub value: DiscountFraction,
    pub label: String,
}

/// 0% to 50% in 5% steps.
pub fn discount_options() -> Vec<DiscountOption> {
    (0..=MAX_DISCOUNT_PERCENT)
        .step_by(DISCOUNT_STEP_PERCENT as usize)
        .map(|percent| DiscountOption {
            value: Decimal::new(percent as i64, 2),
            label: format!("{}%", percent),
        })
        .collect()
}
