//! Proxy configuration loaded from environment variables.
//!
//! Configuration is read once at startup into an explicit [`ProxyConfig`] and
//! handed to every component. Only malformed values fail startup; missing
//! Shopify credentials surface when an upstream call is attempted, and an
//! empty App Proxy secret makes every signed route reject.
//!
//! # Environment Variables
//!
//! - `SHOPIFY_API_SECRET` - App Proxy shared secret (default: empty, rejects all)
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2026-01)
//! - `SHOPIFY_ADMIN_ACCESS_TOKEN` - Admin API access token
//! - `SHOPIFY_TIMEOUT_SECS` - Upstream HTTP timeout in seconds (default: 30)
//! - `PROXY_HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (default: 1.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Proxy application configuration.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// App Proxy signature configuration
    pub app_proxy: AppProxyConfig,
    /// Shopify Admin API configuration
    pub shopify: ShopifyAdminConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// App Proxy signature configuration.
#[derive(Clone)]
pub struct AppProxyConfig {
    /// HMAC key shared with Shopify. Empty means every request is rejected.
    pub shared_secret: SecretString,
}

impl std::fmt::Debug for AppProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppProxyConfig")
            .field("shared_secret", &"[REDACTED]")
            .finish()
    }
}

/// Shopify Admin API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyAdminConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: Option<String>,
    /// Shopify API version (e.g., 2026-01)
    pub api_version: String,
    /// Admin API access token
    pub access_token: Option<SecretString>,
    /// Timeout applied by the HTTP client to each upstream call
    pub timeout: Duration,
}

impl std::fmt::Debug for ShopifyAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyAdminConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProxyConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a value is present but cannot
    /// be parsed (host, port, timeout).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("PROXY_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PROXY_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        let app_proxy = AppProxyConfig {
            shared_secret: SecretString::from(get_env_or_default("SHOPIFY_API_SECRET", "")),
        };
        let shopify = ShopifyAdminConfig::from_env()?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            app_proxy,
            shopify,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Non-fatal configuration problems worth logging at startup.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let secret = self.app_proxy.shared_secret.expose_secret();
        if secret.is_empty() {
            warnings.push(
                "SHOPIFY_API_SECRET is empty; all App Proxy requests will be rejected".to_string(),
            );
        } else if let Err(e) = validate_secret_strength(secret, "SHOPIFY_API_SECRET") {
            warnings.push(e.to_string());
        }

        if self.shopify.store.is_none() {
            warnings.push("SHOPIFY_STORE is not set; quote lookups will fail".to_string());
        }
        if self.shopify.access_token.is_none() {
            warnings
                .push("SHOPIFY_ADMIN_ACCESS_TOKEN is not set; quote lookups will fail".to_string());
        }

        warnings
    }
}

impl ShopifyAdminConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = get_env_or_default("SHOPIFY_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPIFY_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            store: get_optional_env("SHOPIFY_STORE"),
            api_version: get_env_or_default("SHOPIFY_API_VERSION", "2026-01"),
            access_token: get_optional_env("SHOPIFY_ADMIN_ACCESS_TOKEN").map(SecretString::from),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// GraphQL endpoint for the configured store and version.
    #[must_use]
    pub fn graphql_endpoint(&self) -> Option<String> {
        self.store
            .as_ref()
            .map(|store| format!("https://{store}/admin/api/{}/graphql.json", self.api_version))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Check that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
