use dotenvy::dotenv;
use loan_ledger::{
    config::{self, database},
    entities::Loan,
    errors::Result,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    // 3. Load the ledger configuration
    let ledger_config = config::ledger::load_default_config()
        .inspect_err(|e| error!("Failed to load ledger configuration: {}", e))?;
    info!(
        default_currency = %ledger_config.default_currency,
        "Ledger configuration loaded."
    );

    // 4. Connect and make sure the schema exists
    let db = database::create_connection(&ledger_config)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    let loans = Loan::find().count(&db).await?;
    info!(loans, "Loan ledger ready.");

    Ok(())
}
