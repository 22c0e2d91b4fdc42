pub mod calculator;
pub mod cart;
pub mod catalog;
pub mod discount;
pub mod draft;
pub mod settings;
pub mod validation;

pub use crate::calculator::{BudgetCalculator, CommitOutcome};
pub use crate::catalog::{Catalog, CatalogApi, CatalogState, HttpCatalogApi, Product};
pub use crate::settings::Settings;
