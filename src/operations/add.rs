use crate::error::Result;
use crate::models::category::Category;
use crate::models::expense::Expense;
use crate::operations::validate::{parse_amount, validate_name};
use crate::store::expense_store::ExpenseStore;
use tracing::debug;

/// Validates user input and appends the expense to the log.
///
/// Nothing is written when the name or amount is rejected.
pub fn add_expense(
    store: &ExpenseStore,
    name: &str,
    amount_str: &str,
    category: Category,
) -> Result<Expense> {
    let name = validate_name(name)?;
    let amount = parse_amount(amount_str)?;
    let expense = Expense::new(name, amount, category);
    store.append(&expense)?;
    debug!(%expense, "expense added");
    Ok(expense)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> ExpenseStore {
        ExpenseStore::new(dir.path().join("Finances.csv"))
    }

    #[test]
    fn test_add_expense_success() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let expense = add_expense(&store, "Coffee", "4.5", Category::Food).unwrap();

        assert_eq!(expense.amount, dec!(4.50));
        let all = store.read_all().unwrap();
        assert_eq!(all.last(), Some(&expense));
    }

    #[test]
    fn test_add_expense_invalid_name_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let result = add_expense(&store, "@@@", "10", Category::Fun);

        assert!(matches!(result, Err(Error::InvalidName(_))));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_add_expense_invalid_amount_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        add_expense(&store, "Rent", "900", Category::Home).unwrap();

        let result = add_expense(&store, "Snack", "12.345", Category::Food);

        assert!(matches!(result, Err(Error::InvalidAmount(_))));
        assert_eq!(store.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_add_expense_padded_name_reads_back_equal() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let expense = add_expense(&store, " Tea ", "1.25", Category::Food).unwrap();

        assert_eq!(expense.name, "Tea");
        assert_eq!(store.read_all().unwrap().last(), Some(&expense));
    }

    #[test]
    fn test_add_expense_blank_name_rejected() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let result = add_expense(&store, "   ", "5", Category::Food);

        assert!(matches!(result, Err(Error::InvalidName(_))));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_add_expense_oversized_amount_rejected() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let result = add_expense(&store, "Yacht", "9999999999999999999999999999", Category::Fun);

        assert!(matches!(result, Err(Error::InvalidAmount(_))));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_add_expense_empty_amount_rejected() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let result = add_expense(&store, "Snack", "", Category::Food);
        assert_eq!(result.unwrap_err().to_string(), "Invalid amount format");
    }
}
