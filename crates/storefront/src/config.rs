//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `PRICING_CATALOG_PATH` - YAML pricing catalog; the built-in catalog is used when unset
//! - `QUOTE_TAX_RATE` - Tax rate applied to quote totals, within 0..=1 (default: 0.21)
//! - `PRICING_CACHE_CAPACITY` - Max cached category pricing entries (default: 1024)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, within 0..=1 (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use promo_quote_core::pricing::DEFAULT_TAX_RATE;
use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_CACHE_CAPACITY: u64 = 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Optional YAML catalog replacing the built-in pricing data
    pub catalog_path: Option<PathBuf>,
    /// Tax rate applied to `totalWithTax`
    pub tax_rate: Decimal,
    /// Max entries in the category pricing cache
    pub cache_capacity: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            catalog_path: None,
            tax_rate: DEFAULT_TAX_RATE,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let catalog_path = get_optional_env("PRICING_CATALOG_PATH").map(PathBuf::from);
        let tax_rate = parse_tax_rate(&get_env_or_default("QUOTE_TAX_RATE", "0.21"))
            .map_err(|reason| ConfigError::InvalidEnvVar("QUOTE_TAX_RATE".to_string(), reason))?;
        let cache_capacity = parse_env("PRICING_CACHE_CAPACITY", "1024")?;

        let sentry_sample_rate: f32 = parse_env("SENTRY_SAMPLE_RATE", "1.0")?;
        if !(0.0..=1.0).contains(&sentry_sample_rate) {
            return Err(ConfigError::InvalidEnvVar(
                "SENTRY_SAMPLE_RATE".to_string(),
                "must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            catalog_path,
            tax_rate,
            cache_capacity,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse a tax rate given as a decimal fraction (`0.21` for 21%).
///
/// # Errors
///
/// Returns a reason if the text is not a decimal within `0..=1`.
pub fn parse_tax_rate(text: &str) -> Result<Decimal, String> {
    let rate: Decimal = text.trim().parse().map_err(|e| format!("{e}"))?;
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(format!("must be between 0 and 1, got {rate}"));
    }
    Ok(rate)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
