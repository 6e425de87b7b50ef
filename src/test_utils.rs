//! Shared test utilities for the loan ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test loans with sensible defaults.

use crate::{core::loan, entities, errors::Result};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test loan with sensible defaults.
///
/// # Defaults
/// * `amount`: 5000
/// * `currency_code`: "VND"
/// * `terms`: 3
/// * `processed_at`: 2020-01-20
pub async fn create_test_loan(db: &DatabaseConnection, user_id: i64) -> Result<entities::loan::Model> {
    let processed_at = NaiveDate::from_ymd_opt(2020, 1, 20).unwrap_or_default();
    loan::create_loan(db, user_id, 5000, "VND".to_string(), 3, processed_at).await
}

/// Creates a test loan with custom parameters.
pub async fn create_custom_loan(
    db: &DatabaseConnection,
    user_id: i64,
    amount: i64,
    currency_code: &str,
    terms: i32,
    processed_at: NaiveDate,
) -> Result<entities::loan::Model> {
    loan::create_loan(
        db,
        user_id,
        amount,
        currency_code.to_string(),
        terms,
        processed_at,
    )
    .await
}

/// Sets up a complete test environment with one default loan.
/// Returns (db, loan) for common test scenarios.
pub async fn setup_with_loan() -> Result<(DatabaseConnection, entities::loan::Model)> {
    let db = setup_test_db().await?;
    let loan = create_test_loan(&db, 1).await?;
    Ok((db, loan))
}
