use anyhow::Result;
use base::entities::MoneyValue;
use base::helpers::{discounted_total, format_money, round_money};
use rust_decimal::Decimal;

use crate::catalog::ProductId;
use crate::discount::DiscountFraction;

pub type Quantity = Decimal;

/// The line item being edited. Every field is optional, `None` standing for an
/// input the user has not filled in or has cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftLineItem {
    pub selected_product_id: Option<ProductId>,
    pub unit_price: Option<MoneyValue>,
    pub quantity: Option<Quantity>,
    pub discount: Option<DiscountFraction>,
}

impl DraftLineItem {
    pub fn new() -> Self {
        Default::default()
    }

    /// Unit price rounded to cents, zero when unset.
    pub fn unit_price(&self) -> MoneyValue {
        round_money(self.unit_price.unwrap_or_default())
    }

    pub fn formatted_unit_price(&self) -> String {
        format_money(self.unit_price())
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity.unwrap_or_default()
    }

    pub fn discount(&self) -> DiscountFraction {
        self.discount.unwrap_or_default()
    }

    /// Total of the draft as typed, before it is added to the cart. Zero unless both
    /// the unit price and the quantity are filled with non-zero values.
    pub fn total(&self) -> Result<Decimal> {
        match (self.unit_price, self.quantity) {
            (Some(unit_price), Some(quantity)) if !unit_price.is_zero() && !quantity.is_zero() => {
                discounted_total(unit_price, quantity, self.discount())
            }
            _ => Ok(Decimal::ZERO),
        }
    }

    pub fn formatted_total(&self) -> Result<String> {
        Ok(format_money(self.total()?))
    }
}
