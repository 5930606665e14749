use crate::models::budget::DEFAULT_BUDGET;
use rust_decimal::Decimal;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "EXPENSE_DASH_DATA_DIR";

#[derive(Debug, Clone)]
pub struct Settings {
    pub default_budget: Decimal,
    pub history_limit: usize,
    pub expense_file_name: String,
    pub budget_file_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_budget: DEFAULT_BUDGET,
            history_limit: 10,
            expense_file_name: "Finances.csv".to_string(),
            budget_file_name: "Budget.txt".to_string(),
        }
    }
}
