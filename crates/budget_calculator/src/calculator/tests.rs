use super::*;
use anyhow::bail;
use base::notifier::NotificationVariant;
use log::Level;
use rust_decimal_macros::dec;
use std::cell::RefCell;

use crate::catalog::Product;

#[derive(Default)]
struct RecordingNotifier {
    notifications: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    fn new() -> Self {
        Default::default()
    }

    fn last(&self) -> Option<Notification> {
        self.notifications.borrow().last().cloned()
    }

    fn count(&self) -> usize {
        self.notifications.borrow().len()
    }
}

impl Notifier for RecordingNotifier {
    fn send_notification(&self, notification: &Notification) -> Result<()> {
        self.notifications.borrow_mut().push(notification.clone());
        Ok(())
    }
}

struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn send_notification(&self, _notification: &Notification) -> Result<()> {
        bail!("toast surface is gone")
    }
}

fn product(id: &str, name: &str, unit_price: Decimal) -> Product {
    Product {
        id: String::from(id),
        name: String::from(name),
        description: None,
        unit_price,
    }
}

fn widget_catalog() -> Catalog {
    Catalog::from_products(vec![
        product("p1", "Widget", dec!(10.0)),
        product("p2", "Gadget", dec!(2.5)),
    ])
}

fn loaded_calculator(notifier: &RecordingNotifier) -> BudgetCalculator<&RecordingNotifier> {
    let mut calculator = BudgetCalculator::new(notifier);
    calculator.on_catalog_loaded(Ok(widget_catalog()));
    calculator
}

#[test]
#[allow(non_snake_case)]
fn add_to_cart__widget_with_ten_percent_discount__should_add_item_and_notify_success() {
    let notifier = RecordingNotifier::new();
    let mut calculator = loaded_calculator(&notifier);

    calculator.select_product("p1").unwrap();
    assert_eq!(calculator.unit_price(), "10.00");

    calculator.set_quantity(Some(dec!(3)));
    calculator.set_discount(Some(dec!(0.10)));
    assert_eq!(calculator.product_total_value().unwrap(), "27.00");

    assert_eq!(calculator.add_to_cart(), CommitOutcome::Added);

    let items = calculator.purchase_list();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_id, "p1");
    assert_eq!(items[0].product_name, "Widget");
    assert_eq!(items[0].quantity, dec!(3));
    assert_eq!(items[0].formatted_unit_price(), "10.00");
    assert_eq!(items[0].discount, dec!(0.10));
    assert_eq!(items[0].formatted_discount_percent(), "10%");
    assert_eq!(items[0].formatted_total_value(), "27.00");
    assert_eq!(calculator.total_value().unwrap(), "27.00");

    assert_eq!(
        notifier.last(),
        Some(Notification::success(
            DEFAULT_NOTIFICATION_TITLE,
            PRODUCT_ADDED_MESSAGE
        ))
    );
}

#[test]
#[allow(non_snake_case)]
fn add_to_cart__no_product_selected__should_reject_and_notify_error() {
    let notifier = RecordingNotifier::new();
    let mut calculator = loaded_calculator(&notifier);

    calculator.set_quantity(Some(dec!(2)));
    calculator.set_unit_price(Some(dec!(5)));

    let outcome = calculator.add_to_cart();

    assert_eq!(
        outcome,
        CommitOutcome::Rejected(ValidationErrors(vec![
            ValidationError::ProductNotSelected
        ]))
    );
    assert!(calculator.purchase_list().is_empty());

    let notification = notifier.last().unwrap();
    assert_eq!(notification.variant, NotificationVariant::Error);
    assert!(notification.message.contains("select a product"));
}

#[test]
#[allow(non_snake_case)]
fn add_to_cart__quantity_is_unset_or_zero__should_leave_cart_unchanged() {
    let notifier = RecordingNotifier::new();
    let mut calculator = loaded_calculator(&notifier);
    calculator.select_product("p1").unwrap();

    for quantity in [None, Some(Decimal::ZERO)] {
        calculator.set_quantity(quantity);

        match calculator.add_to_cart() {
            CommitOutcome::Rejected(errors) => {
                assert_eq!(errors.errors(), &[ValidationError::InvalidQuantity])
            }
            outcome => panic!("unexpected outcome {:?}", outcome),
        }
    }

    assert!(calculator.purchase_list().is_empty());
    assert_eq!(notifier.count(), 2);
}

#[test]
#[allow(non_snake_case)]
fn add_to_cart__unit_price_overridden_with_zero__should_reject_price() {
    let notifier = RecordingNotifier::new();
    let mut calculator = loaded_calculator(&notifier);

    calculator.select_product("p1").unwrap();
    calculator.set_quantity(Some(dec!(1)));
    calculator.set_unit_price(Some(Decimal::ZERO));

    match calculator.add_to_cart() {
        CommitOutcome::Rejected(errors) => {
            assert_eq!(errors.errors(), &[ValidationError::InvalidUnitPrice])
        }
        outcome => panic!("unexpected outcome {:?}", outcome),
    }

    assert!(calculator.cart().is_empty());
}

#[test]
#[allow(non_snake_case)]
fn add_to_cart__every_check_fails__should_send_one_notification_with_all_messages() {
    let notifier = RecordingNotifier::new();
    let mut calculator = loaded_calculator(&notifier);

    calculator.add_to_cart();

    assert_eq!(notifier.count(), 1);
    assert_eq!(notifier.last().unwrap().message.lines().count(), 3);
}

#[test]
#[allow(non_snake_case)]
fn add_to_cart__successful_commit__should_keep_draft_values() {
    let notifier = RecordingNotifier::new();
    let mut calculator = loaded_calculator(&notifier);

    calculator.select_product("p2").unwrap();
    calculator.set_quantity(Some(dec!(4)));
    calculator.add_to_cart();
    calculator.add_to_cart();

    assert_eq!(calculator.draft().selected_product_id.as_deref(), Some("p2"));
    assert_eq!(calculator.quantity(), dec!(4));
    assert_eq!(calculator.purchase_list().len(), 2);
    assert_eq!(calculator.total_value().unwrap(), "20.00");
}

#[test]
#[allow(non_snake_case)]
fn add_to_cart__overflowing_total__should_log_error_without_notifying() {
    testing_logger::setup();

    let notifier = RecordingNotifier::new();
    let mut calculator = loaded_calculator(&notifier);

    calculator.select_product("p1").unwrap();
    calculator.set_unit_price(Some(Decimal::MAX));
    calculator.set_quantity(Some(dec!(2)));

    assert_eq!(calculator.add_to_cart(), CommitOutcome::Failed);
    assert!(calculator.purchase_list().is_empty());
    assert_eq!(notifier.count(), 0);

    testing_logger::validate(|captured_logs| {
        let number_of_error_logs = captured_logs
            .iter()
            .filter(|log| matches!(log.level, Level::Error))
            .count();

        assert_eq!(number_of_error_logs, 1);
    });
}

#[test]
#[allow(non_snake_case)]
fn add_to_cart__discount_too_large_for_percent__should_log_error_without_notifying() {
    testing_logger::setup();

    let notifier = RecordingNotifier::new();
    let mut calculator = loaded_calculator(&notifier);

    calculator.select_product("p1").unwrap();
    calculator.set_unit_price(Some(dec!(0.01)));
    calculator.set_quantity(Some(dec!(1)));
    calculator.set_discount(Some(Decimal::MAX));

    assert_eq!(calculator.add_to_cart(), CommitOutcome::Failed);
    assert!(calculator.purchase_list().is_empty());
    assert_eq!(notifier.count(), 0);

    testing_logger::validate(|captured_logs| {
        let errors: Vec<_> = captured_logs
            .iter()
            .filter(|log| matches!(log.level, Level::Error))
            .collect();

        assert_eq!(errors.len(), 1);
        assert!(errors[0].body.contains("percent"));
    });

    calculator.set_discount(Some(dec!(0.50)));
    assert_eq!(calculator.add_to_cart(), CommitOutcome::Added);
}

#[test]
#[allow(non_snake_case)]
fn select_product__unknown_id__should_return_not_found_and_keep_draft() {
    let notifier = RecordingNotifier::new();
    let mut calculator = loaded_calculator(&notifier);
    calculator.select_product("p1").unwrap();

    let res = calculator.select_product("p9");

    assert_eq!(res, Err(ValidationError::ProductNotFound(String::from("p9"))));
    assert_eq!(calculator.draft().selected_product_id.as_deref(), Some("p1"));
    assert_eq!(calculator.unit_price(), "10.00");
    assert_eq!(notifier.last().unwrap().variant, NotificationVariant::Error);
}

#[test]
#[allow(non_snake_case)]
fn select_product__catalog_is_pending__should_reject_selection() {
    let notifier = RecordingNotifier::new();
    let mut calculator = BudgetCalculator::new(&notifier);

    assert_eq!(calculator.catalog_state(), &CatalogState::Pending);
    assert!(calculator.product_options().is_empty());
    assert!(calculator.select_product("p1").is_err());

    calculator.on_catalog_loaded(Ok(widget_catalog()));

    assert_eq!(calculator.product_options().len(), 2);
    assert!(calculator.select_product("p1").is_ok());
}

#[test]
#[allow(non_snake_case)]
fn on_catalog_loaded__error_response__should_reject_every_selection() {
    let notifier = RecordingNotifier::new();
    let mut calculator = BudgetCalculator::new(&notifier);

    assert!(calculator.request_catalog_load());
    assert!(!calculator.request_catalog_load());
    calculator.on_catalog_loaded(Err(anyhow::anyhow!("unreachable service")));

    assert_eq!(calculator.catalog_state(), &CatalogState::Unavailable);
    assert!(calculator.select_product("p1").is_err());
}

#[test]
#[allow(non_snake_case)]
fn clear_list__filled_cart__should_reset_total() {
    let notifier = RecordingNotifier::new();
    let mut calculator = loaded_calculator(&notifier);

    calculator.select_product("p1").unwrap();
    calculator.set_quantity(Some(dec!(1)));
    calculator.add_to_cart();
    calculator.select_product("p2").unwrap();
    calculator.add_to_cart();

    let snapshot = calculator.cart().clone();
    assert_eq!(calculator.total_value().unwrap(), "12.50");

    calculator.clear_list();

    assert!(calculator.purchase_list().is_empty());
    assert_eq!(calculator.total_value().unwrap(), "0.00");
    assert_eq!(snapshot.len(), 2);
}

#[test]
#[allow(non_snake_case)]
fn discount_options__new_calculator__should_expose_eleven_options() {
    let calculator = BudgetCalculator::new(RecordingNotifier::new());

    assert_eq!(calculator.discount_options().len(), 11);
    assert_eq!(calculator.discount(), Decimal::ZERO);
}

#[test]
#[allow(non_snake_case)]
fn add_to_cart__notifier_fails__should_still_add_item() {
    let mut calculator = BudgetCalculator::new(FailingNotifier).with_notification_title("Quote");
    calculator.on_catalog_loaded(Ok(widget_catalog()));

    calculator.select_product("p1").unwrap();
    calculator.set_quantity(Some(dec!(1)));

    assert_eq!(calculator.add_to_cart(), CommitOutcome::Added);
    assert_eq!(calculator.purchase_list().len(), 1);
}
