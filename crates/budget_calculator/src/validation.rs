use rust_decimal::Decimal;
use std::fmt::{Display, Formatter};
use thiserror::Error;

use crate::catalog::{Catalog, Product, ProductId};
use crate::draft::DraftLineItem;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("You must select a product!")]
    ProductNotSelected,
    #[error("Product {0} is not available in the catalog, select a product from the list.")]
    ProductNotFound(ProductId),
    #[error("The product quantity must be greater than zero.")]
    InvalidQuantity,
    #[error("The product price cannot be less than or equal to zero.")]
    InvalidUnitPrice,
}

/// Every failed check of a draft, displayed one message per line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            write!(f, "{}", error)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks the draft against the catalog, collecting every failure rather than
/// stopping at the first one. Returns the selected product on success.
pub fn validate_draft<'a>(
    draft: &DraftLineItem,
    catalog: Option<&'a Catalog>,
) -> Result<&'a Product, ValidationErrors> {
    let mut errors = Vec::new();

    let product = match (&draft.selected_product_id, catalog) {
        (Some(id), Some(catalog)) => catalog.find(id),
        _ => None,
    };

    if product.is_none() {
        errors.push(ValidationError::ProductNotSelected);
    }

    if draft.quantity() <= Decimal::ZERO {
        errors.push(ValidationError::InvalidQuantity);
    }

    if draft.unit_price() <= Decimal::ZERO {
        errors.push(ValidationError::InvalidUnitPrice);
    }

    match product {
        Some(product) if errors.is_empty() => Ok(product),
        _ => Err(ValidationErrors(errors)),
    }
}
