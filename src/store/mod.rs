pub mod budget_store;
pub mod expense_store;
pub mod paths;

use crate::config::Settings;
use budget_store::BudgetStore;
use expense_store::ExpenseStore;
use paths::DataPaths;

/// Both files of one data directory.
#[derive(Debug, Clone)]
pub struct Stores {
    pub paths: DataPaths,
    pub expenses: ExpenseStore,
    pub budget: BudgetStore,
}

impl Stores {
    pub fn open(paths: DataPaths, settings: &Settings) -> Self {
        let expenses = ExpenseStore::new(paths.expense_file());
        let budget = BudgetStore::new(paths.budget_file(), settings.default_budget);
        Self {
            paths,
            expenses,
            budget,
        }
    }
}
