use crate::models::category::Category;
use crate::models::expense::Expense;

pub fn search_expenses_by_category(category: Category, expenses: &[Expense]) -> Vec<&Expense> {
    expenses
        .iter()
        .filter(|expense| expense.category == category)
        .collect()
}
