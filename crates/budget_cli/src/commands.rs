use anyhow::{bail, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Products,
    Discounts,
    Select(String),
    Price(Option<Decimal>),
    Quantity(Option<Decimal>),
    Discount(Option<Decimal>),
    Draft,
    Add,
    Cart,
    Total,
    Clear,
    Help,
    Quit,
}

pub const HELP: &str = "\
products            list the catalog
discounts           list the discount options
select <id>         select a product and take its catalog price
price [value]       override the unit price, no value clears it
qty [value]         set the quantity, no value clears it
discount [value]    set the discount fraction (0.05 = 5%), no value clears it
draft               show the line item being edited
add                 add the line item to the cart
cart                show the cart
total               show the cart total
clear               empty the cart
help                show this message
quit                exit";

/// An unparseable number clears the field, like an emptied form input.
fn parse_value(arg: Option<&str>) -> Option<Decimal> {
    let arg = arg?;

    match Decimal::from_str(arg) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("invalid number {}: {}", arg, e);
            None
        }
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut words = input.split_whitespace();
        let name = match words.next() {
            Some(name) => name.to_lowercase(),
            None => bail!("empty command"),
        };
        let arg = words.next();

        let command = match name.as_str() {
            "products" => Self::Products,
            "discounts" => Self::Discounts,
            "select" => match arg {
                Some(id) => Self::Select(id.to_string()),
                None => bail!("select needs a product id"),
            },
            "price" => Self::Price(parse_value(arg)),
            "qty" | "quantity" => Self::Quantity(parse_value(arg)),
            "discount" => Self::Discount(parse_value(arg)),
            "draft" => Self::Draft,
            "add" => Self::Add,
            "cart" => Self::Cart,
            "total" => Self::Total,
            "clear" => Self::Clear,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => bail!("unknown command: {}", name),
        };

        Ok(command)
    }
}
