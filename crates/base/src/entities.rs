use rust_decimal::Decimal;

pub const MONEY_DECIMAL_PLACES: u32 = 2;

pub type MoneyValue = Decimal;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Item<I, P> {
    pub id: I,
    pub props: P,
}
