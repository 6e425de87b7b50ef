//! Ledger configuration loading from ledger.toml
//!
//! The file is optional. When it is absent every setting takes its default,
//! so a bare deployment only needs `DATABASE_URL` (or nothing at all).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Currency assumed when a caller has none of its own
pub const DEFAULT_CURRENCY: &str = "VND";

/// Configuration structure representing the entire ledger.toml file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LedgerConfig {
    /// Currency code callers fall back to when creating loans
    pub default_currency: String,
    /// Database URL, overridden by the `DATABASE_URL` environment variable
    pub database_url: Option<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            database_url: None,
        }
    }
}

impl LedgerConfig {
    /// Returns `currency_code` when given, otherwise the configured default.
    #[must_use]
    pub fn currency_or_default(&self, currency_code: Option<String>) -> String {
        currency_code.unwrap_or_else(|| self.default_currency.clone())
    }
}

/// Loads ledger configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LedgerConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads configuration from `LEDGER_CONFIG`, or ./ledger.toml when unset.
///
/// A missing file yields the defaults; an unreadable or malformed one is an error.
pub fn load_default_config() -> Result<LedgerConfig> {
    let path = std::env::var("LEDGER_CONFIG").unwrap_or_else(|_| "ledger.toml".to_string());

    if !Path::new(&path).exists() {
        info!("No configuration file at {}, using defaults.", path);
        return Ok(LedgerConfig::default());
    }

    load_config(&path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_ledger_config() {
        let toml_str = r#"
            default_currency = "USD"
            database_url = "sqlite://ledger.sqlite?mode=rwc"
        "#;

        let config: LedgerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_currency, "USD");
        assert_eq!(
            config.database_url.as_deref(),
            Some("sqlite://ledger.sqlite?mode=rwc")
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: LedgerConfig = toml::from_str("").unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.default_currency, "VND");
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_currency_or_default() {
        let config = LedgerConfig {
            default_currency: "USD".to_string(),
            ..LedgerConfig::default()
        };
        assert_eq!(config.currency_or_default(None), "USD");
        assert_eq!(config.currency_or_default(Some("EUR".to_string())), "EUR");
        assert_eq!(LedgerConfig::default().currency_or_default(None), "VND");
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("does/not/exist/ledger.toml");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_load_config_malformed() {
        let path = std::env::temp_dir().join("loan_ledger_malformed_config.toml");
        std::fs::write(&path, "default_currency = ").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(Error::Config { message: _ })));

        std::fs::remove_file(&path).unwrap();
    }
}
