use anyhow::Result;
use base::notifier::Notifier;
use budget_calculator::{BudgetCalculator, CatalogState, CommitOutcome};
use std::io::Write;

use crate::commands::{Command, HELP};

pub enum Flow {
    Continue,
    Quit,
}

/// The value, or `n/a` once the failure is logged.
fn value_or_na(value: Result<String>) -> String {
    value.unwrap_or_else(|e| {
        log::error!("an error occurred on calculating a value: {:?}", e);
        String::from("n/a")
    })
}

fn write_products<N: Notifier, W: Write>(
    calculator: &BudgetCalculator<N>,
    out: &mut W,
) -> Result<()> {
    match calculator.catalog_state() {
        CatalogState::Pending => writeln!(out, "the catalog is still loading")?,
        CatalogState::Unavailable => writeln!(out, "the catalog is unavailable")?,
        CatalogState::Ready(_) => {
            for option in calculator.product_options() {
                match option.description {
                    Some(description) => {
                        writeln!(out, "{}\t{}\t{}", option.value, option.label, description)?
                    }
                    None => writeln!(out, "{}\t{}", option.value, option.label)?,
                }
            }
        }
    }

    Ok(())
}

fn write_cart<N: Notifier, W: Write>(
    calculator: &BudgetCalculator<N>,
    out: &mut W,
) -> Result<()> {
    if calculator.purchase_list().is_empty() {
        writeln!(out, "the cart is empty")?;
    }

    for item in calculator.purchase_list() {
        writeln!(
            out,
            "{}\t{}\t{} x {}\t-{}\t{}",
            item.product_id,
            item.product_name,
            item.quantity,
            item.formatted_unit_price(),
            item.formatted_discount_percent(),
            item.formatted_total_value()
        )?;
    }

    writeln!(out, "total: {}", value_or_na(calculator.total_value()))?;
    Ok(())
}

pub fn execute<N: Notifier, W: Write>(
    command: Command,
    calculator: &mut BudgetCalculator<N>,
    out: &mut W,
) -> Result<Flow> {
    match command {
        Command::Products => write_products(calculator, out)?,
        Command::Discounts => {
            for option in calculator.discount_options() {
                writeln!(out, "{}\t{}", option.value, option.label)?;
            }
        }
        Command::Select(id) => {
            if calculator.select_product(&id).is_ok() {
                writeln!(out, "unit price: {}", calculator.unit_price())?;
            }
        }
        Command::Price(value) => calculator.set_unit_price(value),
        Command::Quantity(value) => calculator.set_quantity(value),
        Command::Discount(value) => calculator.set_discount(value),
        Command::Draft => {
            let draft = calculator.draft();
            writeln!(
                out,
                "product: {}\nunit price: {}\nquantity: {}\ndiscount: {}\ntotal: {}",
                draft.selected_product_id.as_deref().unwrap_or("-"),
                calculator.unit_price(),
                calculator.quantity(),
                calculator.discount(),
                value_or_na(calculator.product_total_value())
            )?;
        }
        Command::Add => {
            if let CommitOutcome::Failed = calculator.add_to_cart() {
                log::debug!("the line item was not added, see the error above");
            }
        }
        Command::Cart => write_cart(calculator, out)?,
        Command::Total => writeln!(out, "{}", value_or_na(calculator.total_value()))?,
        Command::Clear => calculator.clear_list(),
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}
