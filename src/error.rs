use thiserror::Error;

/// Errors returned by store and operation functions.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid name format")]
    InvalidName(String),

    #[error("Invalid amount format")]
    InvalidAmount(String),

    #[error("Invalid budget amount")]
    InvalidBudget(String),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Totals are too large to compute")]
    AmountOverflow,

    #[error("No expenses to remove.")]
    NoExpenses,

    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Terminal error: {0}")]
    Terminal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
