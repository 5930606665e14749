use crate::models::category::Category;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Number of decimals every stored amount carries.
pub const AMOUNT_SCALE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub name: String,
    pub amount: Decimal,
    pub category: Category,
}

impl Expense {
    pub fn new(name: String, mut amount: Decimal, category: Category) -> Self {
        amount.rescale(AMOUNT_SCALE);
        Self {
            name,
            amount,
            category,
        }
    }

    /// The persisted form, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!("{}, {}, {}", self.name, format_money(self.amount), self.category)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Expense: {}, {}, ${}>",
            self.name,
            self.category,
            format_money(self.amount)
        )
    }
}

/// `amount` at two decimals, or `None` when it has too many digits to carry them.
pub fn at_amount_scale(mut amount: Decimal) -> Option<Decimal> {
    amount.rescale(AMOUNT_SCALE);
    (amount.scale() == AMOUNT_SCALE).then_some(amount)
}

/// Rounds half away from zero and always prints two decimals.
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(AMOUNT_SCALE);
    rounded.to_string()
}
