use anyhow::Result;
use base::notifier::{Notification, Notifier};
use rust_decimal::Decimal;

use crate::cart::{Cart, PurchasedItem};
use crate::catalog::{Catalog, CatalogApi, CatalogLoader, CatalogState, ProductOption};
use crate::discount::{discount_options, DiscountFraction, DiscountOption};
use crate::draft::{DraftLineItem, Quantity};
use crate::validation::{validate_draft, ValidationError, ValidationErrors};

#[cfg(test)]
mod tests;

pub const DEFAULT_NOTIFICATION_TITLE: &str = "Budget calculator";
pub const PRODUCT_ADDED_MESSAGE: &str = "Product added successfully!";

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Added,
    Rejected(ValidationErrors),
    /// An unexpected fault, already logged. The user is not notified.
    Failed,
}

/// State behind the quotation form: the catalog, the draft line item and the cart.
pub struct BudgetCalculator<N: Notifier> {
    catalog: CatalogLoader,
    discount_options: Vec<DiscountOption>,
    draft: DraftLineItem,
    cart: Cart,
    notifier: N,
    notification_title: String,
}

impl<N: Notifier> BudgetCalculator<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            catalog: CatalogLoader::new(),
            discount_options: discount_options(),
            draft: DraftLineItem::new(),
            cart: Cart::new(),
            notifier,
            notification_title: String::from(DEFAULT_NOTIFICATION_TITLE),
        }
    }

    pub fn with_notification_title(mut self, title: &str) -> Self {
        self.notification_title = title.to_string();
        self
    }

    /// Requests the catalog and applies the response. Does nothing after the first call.
    pub fn load_catalog<A: CatalogApi + ?Sized>(&mut self, api: &A) {
        self.catalog.load(api);
    }

    /// Marks the catalog as requested for callers that fetch it themselves and hand the
    /// response to [`Self::on_catalog_loaded`]. Returns `false` if it was already requested.
    pub fn request_catalog_load(&mut self) -> bool {
        self.catalog.request()
    }

    pub fn on_catalog_loaded(&mut self, response: Result<Catalog>) {
        self.catalog.complete(response);
    }

    pub fn catalog_state(&self) -> &CatalogState {
        self.catalog.state()
    }

    pub fn product_options(&self) -> Vec<ProductOption> {
        self.catalog.options()
    }

    pub fn discount_options(&self) -> &[DiscountOption] {
        &self.discount_options
    }

    /// Selects a product and takes its catalog price as the draft unit price.
    pub fn select_product(&mut self, id: &str) -> Result<(), ValidationError> {
        match self.catalog.price_of(id) {
            Some(unit_price) => {
                self.draft.selected_product_id = Some(id.to_string());
                self.draft.unit_price = Some(unit_price);
                Ok(())
            }
            None => {
                let error = ValidationError::ProductNotFound(id.to_string());
                self.notify(Notification::error(
                    &self.notification_title,
                    &error.to_string(),
                ));
                Err(error)
            }
        }
    }

    pub fn set_unit_price(&mut self, value: Option<Decimal>) {
        self.draft.unit_price = value;
    }

    pub fn set_quantity(&mut self, value: Option<Quantity>) {
        self.draft.quantity = value;
    }

    pub fn set_discount(&mut self, value: Option<DiscountFraction>) {
        self.draft.discount = value;
    }

    pub fn draft(&self) -> &DraftLineItem {
        &self.draft
    }

    pub fn unit_price(&self) -> String {
        self.draft.formatted_unit_price()
    }

    pub fn quantity(&self) -> Quantity {
        self.draft.quantity()
    }

    pub fn discount(&self) -> DiscountFraction {
        self.draft.discount()
    }

    pub fn product_total_value(&self) -> Result<String> {
        self.draft.formatted_total()
    }

    /// Validates the draft and appends it to the cart. The draft keeps its values
    /// afterwards.
    pub fn add_to_cart(&mut self) -> CommitOutcome {
        let item = validate_draft(&self.draft, self.catalog.catalog())
            .map(|product| PurchasedItem::from_draft(&self.draft, product));

        match item {
            Err(errors) => {
                log::debug!("the draft was rejected: {:?}", errors);
                self.notify(Notification::error(
                    &self.notification_title,
                    &errors.to_string(),
                ));
                CommitOutcome::Rejected(errors)
            }
            Ok(Err(e)) => {
                log::error!(
                    "an error occurred on adding a product to the purchase list: {:?}",
                    e
                );
                CommitOutcome::Failed
            }
            Ok(Ok(item)) => {
                self.cart = self.cart.with_item(item);
                self.notify(Notification::success(
                    &self.notification_title,
                    PRODUCT_ADDED_MESSAGE,
                ));
                CommitOutcome::Added
            }
        }
    }

    pub fn purchase_list(&self) -> &[PurchasedItem] {
        self.cart.items()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn total_value(&self) -> Result<String> {
        self.cart.formatted_total()
    }

    pub fn clear_list(&mut self) {
        self.cart = self.cart.cleared();
    }

    fn notify(&self, notification: Notification) {
        if let Err(e) = self.notifier.send_notification(&notification) {
            log::warn!(
                "an error occurred on sending a {} notification: {:?}",
                notification.variant,
                e
            );
        }
    }
}
