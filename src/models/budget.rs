use rust_decimal::Decimal;

/// Budget used when nothing has been saved yet.
pub const DEFAULT_BUDGET: Decimal = Decimal::from_parts(200000, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyBudget {
    pub amount: Decimal,
}

impl Default for MonthlyBudget {
    fn default() -> Self {
        Self {
            amount: DEFAULT_BUDGET,
        }
    }
}

impl MonthlyBudget {
    pub fn new(mut amount: Decimal) -> Self {
        amount.rescale(crate::models::expense::AMOUNT_SCALE);
        Self { amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_budget() {
        assert_eq!(MonthlyBudget::default().amount, dec!(2000));
        assert_eq!(MonthlyBudget::default().amount.to_string(), "2000.00");
    }
}
