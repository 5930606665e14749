use crate::error::{Error, Result};
use crate::models::budget::MonthlyBudget;
use crate::models::expense::at_amount_scale;
use crate::store::budget_store::BudgetStore;
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn set_budget(store: &BudgetStore, amount_str: &str) -> Result<MonthlyBudget> {
    let amount = Decimal::from_str(amount_str.trim())
        .ok()
        .and_then(at_amount_scale)
        .ok_or_else(|| Error::InvalidBudget(amount_str.to_string()))?;
    if amount.is_sign_negative() {
        return Err(Error::InvalidBudget(amount_str.to_string()));
    }
    let budget = MonthlyBudget::new(amount);
    store.save(budget)?;
    Ok(budget)
}

pub fn current_budget(store: &BudgetStore) -> MonthlyBudget {
    store.load()
}
