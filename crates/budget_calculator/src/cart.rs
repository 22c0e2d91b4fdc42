use anyhow::{Context, Result};
use base::entities::MoneyValue;
use base::helpers::{discounted_total, format_money, percent, round_money};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::catalog::{Product, ProductId};
use crate::discount::DiscountFraction;
use crate::draft::{DraftLineItem, Quantity};

#[derive(Debug, Clone, PartialEq)]
pub struct PurchasedItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: Quantity,
    pub unit_price: MoneyValue,
    pub discount: DiscountFraction,
    pub discount_percent: Decimal,
    pub total_value: MoneyValue,
}

impl PurchasedItem {
    /// Captures the draft's display values: the unit price and the total are rounded
    /// to cents at this point.
    pub fn from_draft(draft: &DraftLineItem, product: &Product) -> Result<Self> {
        let product_id = draft
            .selected_product_id
            .clone()
            .context("no product is selected in the draft")?;

        let unit_price = draft.unit_price();
        let quantity = draft.quantity();
        let discount = draft.discount();

        let total_value = round_money(discounted_total(unit_price, quantity, discount)?);

        Ok(Self {
            product_id,
            product_name: product.name.clone(),
            quantity,
            unit_price,
            discount,
            discount_percent: percent(discount)?,
            total_value,
        })
    }

    /// Unrounded `unit_price * quantity * (1 - discount)`.
    pub fn line_total(&self) -> Result<Decimal> {
        discounted_total(self.unit_price, self.quantity, self.discount)
    }

    pub fn formatted_unit_price(&self) -> String {
        format_money(self.unit_price)
    }

    pub fn formatted_discount_percent(&self) -> String {
        format!("{}%", self.discount_percent)
    }

    pub fn formatted_total_value(&self) -> String {
        format_money(self.total_value)
    }
}

/// Purchased items in the order they were added. A cart is a value: adding or
/// clearing returns a new cart and leaves existing snapshots untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Arc<Vec<PurchasedItem>>,
}

impl Cart {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_item(&self, item: PurchasedItem) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend(self.items.iter().cloned());
        items.push(item);

        Self {
            items: Arc::new(items),
        }
    }

    pub fn cleared(&self) -> Self {
        Self::new()
    }

    pub fn items(&self) -> &[PurchasedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether both values are the same snapshot, not merely equal contents.
    pub fn is_same_snapshot(&self, other: &Cart) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    pub fn total(&self) -> Result<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |sum, item| {
            sum.checked_add(item.line_total()?)
                .context("overflow on summing the cart total")
        })
    }

    pub fn formatted_total(&self) -> Result<String> {
        Ok(format_money(self.total()?))
    }
}
