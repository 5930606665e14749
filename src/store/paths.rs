//! Where the expense log and the budget file live.
//!
//! Resolution order:
//! 1. an explicit directory (the `--data-dir` flag, or `EXPENSE_DASH_DATA_DIR` via clap)
//! 2. the current working directory

use crate::config::Settings;
use crate::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DataPaths {
    base_dir: PathBuf,
    expense_file_name: String,
    budget_file_name: String,
}

impl DataPaths {
    pub fn resolve(explicit: Option<PathBuf>, settings: &Settings) -> Result<Self> {
        let base_dir = match explicit {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        Ok(Self::with_settings(base_dir, settings))
    }

    /// Uses the default file names under `base_dir`.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self::with_settings(base_dir, &Settings::default())
    }

    fn with_settings(base_dir: PathBuf, settings: &Settings) -> Self {
        Self {
            base_dir,
            expense_file_name: settings.expense_file_name.clone(),
            budget_file_name: settings.budget_file_name.clone(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn expense_file(&self) -> PathBuf {
        self.base_dir.join(&self.expense_file_name)
    }

    pub fn budget_file(&self) -> PathBuf {
        self.base_dir.join(&self.budget_file_name)
    }

    pub fn ensure_base_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_file_names() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DataPaths::with_base_dir(temp_dir.path().to_path_buf());
        assert_eq!(paths.expense_file(), temp_dir.path().join("Finances.csv"));
        assert_eq!(paths.budget_file(), temp_dir.path().join("Budget.txt"));
    }

    #[test]
    fn test_explicit_dir_wins() {
        let temp_dir = TempDir::new().unwrap();
        let paths =
            DataPaths::resolve(Some(temp_dir.path().to_path_buf()), &Settings::default()).unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_base_dir_creates_nested() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let paths = DataPaths::with_base_dir(nested.clone());
        paths.ensure_base_dir().unwrap();
        assert!(nested.is_dir());
    }
}
