//! Unified error types for the loan ledger.

use thiserror::Error;

/// Errors surfaced by the ledger engine and its storage layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A loan or repayment amount was zero or negative
    #[error("Invalid amount: {amount} (must be greater than zero)")]
    InvalidAmount {
        /// The rejected amount, in minor currency units
        amount: i64,
    },

    /// A loan was requested with zero or negative installments
    #[error("Invalid terms: {terms} (must be greater than zero)")]
    InvalidTerms {
        /// The rejected installment count
        terms: i32,
    },

    /// A due date fell outside the representable calendar
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// What went wrong
        message: String,
    },

    /// No loan row exists for the given id
    #[error("Loan not found: {id}")]
    LoanNotFound {
        /// The missing loan id
        id: i64,
    },

    /// Storage failure, surfaced as-is
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
