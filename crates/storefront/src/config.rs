//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SOUK_CATALOG_URL` - Catalog API base URL (default: <https://fakestoreapi.com>)
//! - `SOUK_STORE_PATH` - Cart storage file (default: `.souk/storage.json`)
//! - `RUST_LOG` - Log filter, read by the binaries

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";
const DEFAULT_STORE_PATH: &str = ".souk/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Remote catalog configuration
    pub catalog: CatalogConfig,
    /// File backing the cart key-value store
    pub store_path: PathBuf,
}

/// Remote catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; `/products` is appended to it
    pub base_url: Url,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog = CatalogConfig {
            base_url: parse_url(
                "SOUK_CATALOG_URL",
                &lookup("SOUK_CATALOG_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            )?,
        };
        let store_path = PathBuf::from(
            lookup("SOUK_STORE_PATH").unwrap_or_else(|| DEFAULT_STORE_PATH.to_string()),
        );

        Ok(Self {
            catalog,
            store_path,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an HTTP(S) URL from an environment variable value.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.catalog.base_url.as_str(), "https://fakestoreapi.com/");
        assert_eq!(config.store_path, PathBuf::from(".souk/storage.json"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SOUK_CATALOG_URL", "http://127.0.0.1:9000/api/"),
            ("SOUK_STORE_PATH", "/tmp/cart.json"),
        ])
        .unwrap();
        assert_eq!(config.catalog.base_url.as_str(), "http://127.0.0.1:9000/api/");
        assert_eq!(config.store_path, PathBuf::from("/tmp/cart.json"));
    }

    #[test]
    fn test_invalid_url() {
        let err = config_from(&[("SOUK_CATALOG_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "SOUK_CATALOG_URL"));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = config_from(&[("SOUK_CATALOG_URL", "ftp://example.com")]).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }
}
