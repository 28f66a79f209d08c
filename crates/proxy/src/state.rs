//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::shopify::{AdminClient, ShopifyError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Nothing in it is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ProxyConfig,
    shopify: AdminClient,
}

impl AppState {
    /// Create application state with the HTTPS Admin API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ProxyConfig) -> Result<Self, ShopifyError> {
        let shopify = AdminClient::new(&config.shopify)?;
        Ok(Self::with_client(config, shopify))
    }

    /// Create application state around an existing client.
    #[must_use]
    pub fn with_client(config: ProxyConfig, shopify: AdminClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, shopify }),
        }
    }

    /// Get a reference to the proxy configuration.
    #[must_use]
    pub fn config(&self) -> &ProxyConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Admin API client.
    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }
}
