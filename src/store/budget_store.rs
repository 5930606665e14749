use crate::error::Result;
use crate::models::budget::MonthlyBudget;
use crate::models::expense::at_amount_scale;
use rust_decimal::Decimal;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Single-value budget file, overwritten on every save.
#[derive(Debug, Clone)]
pub struct BudgetStore {
    path: PathBuf,
    default: MonthlyBudget,
}

impl BudgetStore {
    pub fn new(path: PathBuf, default_amount: Decimal) -> Self {
        Self {
            path,
            default: MonthlyBudget::new(default_amount),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved budget, or the default when nothing usable is on disk.
    pub fn load(&self) -> MonthlyBudget {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return self.default,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read budget file, using default");
                return self.default;
            }
        };
        match Decimal::from_str(content.trim()).ok().and_then(at_amount_scale) {
            Some(amount) if !amount.is_sign_negative() => MonthlyBudget::new(amount),
            _ => {
                warn!(path = %self.path.display(), content = content.trim(), "invalid budget file, using default");
                self.default
            }
        }
    }

    pub fn save(&self, budget: MonthlyBudget) -> Result<()> {
        fs::write(&self.path, budget.amount.to_string())?;
        info!(path = %self.path.display(), amount = %budget.amount, "saved budget");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::budget::DEFAULT_BUDGET;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> BudgetStore {
        BudgetStore::new(dir.path().join("Budget.txt"), DEFAULT_BUDGET)
    }

    #[test]
    fn test_missing_file_loads_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(&dir).load().amount, dec!(2000));
    }

    #[test]
    fn test_save_overwrites_and_loads() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(MonthlyBudget::new(dec!(1500))).unwrap();
        store.save(MonthlyBudget::new(dec!(2500.5))).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "2500.50");
        assert_eq!(store.load().amount, dec!(2500.50));
    }

    #[test]
    fn test_garbage_or_negative_loads_default() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "lots").unwrap();
        assert_eq!(store.load(), MonthlyBudget::default());

        fs::write(store.path(), "-10").unwrap();
        assert_eq!(store.load(), MonthlyBudget::default());
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), " 750.0\n").unwrap();
        assert_eq!(store.load().amount, dec!(750));
    }
}
