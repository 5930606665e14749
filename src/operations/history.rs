use crate::error::Result;
use crate::store::expense_store::ExpenseStore;

/// Shown when the log has no entries yet.
pub const EMPTY_HISTORY: &str = "No expenses recorded yet.";

/// Recent log lines for display, most recent first.
pub fn spending_history(store: &ExpenseStore, limit: usize) -> Result<Vec<String>> {
    store.recent_lines(limit)
}
