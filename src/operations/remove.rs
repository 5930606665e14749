use crate::error::Result;
use crate::models::expense::Expense;
use crate::store::expense_store::ExpenseStore;
use tracing::info;

/// Removes the most recent expense, typically to undo a typo.
pub fn remove_last_expense(store: &ExpenseStore) -> Result<Option<Expense>> {
    let removed = store.remove_last()?;
    match &removed {
        Some(expense) => info!(%expense, "removed last expense"),
        None => info!("removed last line of expense log"),
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::category::Category;
    use crate::operations::add::add_expense;
    use tempfile::TempDir;

    #[test]
    fn test_remove_last_leaves_previous_entries() {
        let dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(dir.path().join("Finances.csv"));
        add_expense(&store, "Coffee", "4.50", Category::Food).unwrap();
        add_expense(&store, "Bus", "2", Category::Transportation).unwrap();
        let before = store.read_all().unwrap();

        let removed = remove_last_expense(&store).unwrap().unwrap();

        assert_eq!(removed.name, "Bus");
        let after = store.read_all().unwrap();
        assert_eq!(after.as_slice(), &before[..before.len() - 1]);
    }

    #[test]
    fn test_remove_last_without_log() {
        let dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(dir.path().join("Finances.csv"));

        let err = remove_last_expense(&store).unwrap_err();

        assert!(matches!(err, Error::NoExpenses));
        assert_eq!(err.to_string(), "No expenses to remove.");
    }
}
