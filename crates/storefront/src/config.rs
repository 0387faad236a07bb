//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults give a working storefront in
//! the current directory.
//!
//! - `FEIRA_DATA_DIR` - Directory for durable state, including the cart
//!   (default: `.feira`)
//! - `FEIRA_CATALOG_FILE` - Path to the catalog snapshot JSON
//!   (default: `<data dir>/catalog.json`)
//! - `FEIRA_CURRENCY` - Display currency code: BRL, USD, or EUR
//!   (default: BRL)

use std::path::PathBuf;

use thiserror::Error;

use feira_core::CurrencyCode;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding durable state (the cart's storage slots).
    pub data_dir: PathBuf,
    /// Catalog snapshot file.
    pub catalog_file: PathBuf,
    /// Currency used for price display.
    pub currency: CurrencyCode,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir =
            PathBuf::from(get("FEIRA_DATA_DIR").unwrap_or_else(|| ".feira".to_owned()));

        let catalog_file = get("FEIRA_CATALOG_FILE")
            .map_or_else(|| data_dir.join("catalog.json"), PathBuf::from);

        let currency = match get("FEIRA_CURRENCY") {
            Some(raw) => raw.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("FEIRA_CURRENCY".to_owned(), e.to_string())
            })?,
            None => CurrencyCode::default(),
        };

        Ok(Self {
            data_dir,
            catalog_file,
            currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(ToString::to_string)
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config.data_dir, PathBuf::from(".feira"));
        assert_eq!(config.catalog_file, PathBuf::from(".feira/catalog.json"));
        assert_eq!(config.currency, CurrencyCode::BRL);
    }

    #[test]
    fn test_catalog_file_follows_data_dir_default() {
        let config = StorefrontConfig::from_lookup(lookup(&[("FEIRA_DATA_DIR", "/var/feira")]))
            .expect("config");
        assert_eq!(config.catalog_file, PathBuf::from("/var/feira/catalog.json"));
    }

    #[test]
    fn test_explicit_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("FEIRA_DATA_DIR", "/data"),
            ("FEIRA_CATALOG_FILE", "/srv/catalog.json"),
            ("FEIRA_CURRENCY", "usd"),
        ]))
        .expect("config");
        assert_eq!(config.data_dir, PathBuf::from("/data"));
        assert_eq!(config.catalog_file, PathBuf::from("/srv/catalog.json"));
        assert_eq!(config.currency, CurrencyCode::USD);
    }

    #[test]
    fn test_invalid_currency_rejected() {
        let result = StorefrontConfig::from_lookup(lookup(&[("FEIRA_CURRENCY", "DOGE")]));
        let err = result.expect_err("must fail");
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
        assert!(err.to_string().contains("FEIRA_CURRENCY"));
    }
}
