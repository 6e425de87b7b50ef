//! Database configuration module for the loan ledger.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust models.
//! Creation is idempotent and can run on every start.

use crate::config::LedgerConfig;
use crate::entities::{Loan, ReceivedRepayment, ScheduledRepayment};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

/// Fallback used when neither `DATABASE_URL` nor ledger.toml names a database.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/loan_ledger.sqlite?mode=rwc";

/// Resolves the database URL.
///
/// `DATABASE_URL` in the environment wins, then `database_url` from the ledger
/// configuration, then [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn get_database_url(config: &LedgerConfig) -> String {
    std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| config.database_url.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection(config: &LedgerConfig) -> Result<DatabaseConnection> {
    let database_url = get_database_url(config);
    debug!("Connecting to database at {}", database_url);

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the ledger tables if they do not exist yet.
///
/// `loans` is created first since both repayment tables reference it.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut loan_table = schema.create_table_from_entity(Loan);
    let mut scheduled_table = schema.create_table_from_entity(ScheduledRepayment);
    let mut received_table = schema.create_table_from_entity(ReceivedRepayment);

    loan_table.if_not_exists();
    scheduled_table.if_not_exists();
    received_table.if_not_exists();

    db.execute(builder.build(&loan_table)).await?;
    db.execute(builder.build(&scheduled_table)).await?;
    db.execute(builder.build(&received_table)).await?;

    info!("Ledger tables ensured.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{LoanModel, ReceivedRepaymentModel, ScheduledRepaymentModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<LoanModel> = Loan::find().limit(1).all(&db).await?;
        let _: Vec<ScheduledRepaymentModel> = ScheduledRepayment::find().limit(1).all(&db).await?;
        let _: Vec<ReceivedRepaymentModel> = ReceivedRepayment::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_database_url_from_config() {
        // DATABASE_URL may be set in the developer's environment
        if std::env::var("DATABASE_URL").is_ok() {
            return;
        }

        let config = LedgerConfig {
            database_url: Some("sqlite://custom.sqlite".to_string()),
            ..LedgerConfig::default()
        };
        assert_eq!(get_database_url(&config), "sqlite://custom.sqlite");
        assert_eq!(
            get_database_url(&LedgerConfig::default()),
            DEFAULT_DATABASE_URL
        );
    }
}
