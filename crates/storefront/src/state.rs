//! Application state shared across handlers.

use std::path::Path;
use std::sync::Arc;

use moka::future::Cache;
use promo_quote_core::pricing::{CatalogError, CategoryPricing, PricingCatalog};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::config::StorefrontConfig;

/// Error building the pricing catalog at startup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog {path}: {source}")]
    Catalog {
        path: String,
        #[source]
        source: CatalogError,
    },
}

/// Load the pricing catalog from a YAML file, or the built-in one when no
/// path is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not validate.
#[instrument]
pub fn load_catalog(path: Option<&Path>) -> Result<PricingCatalog, CatalogLoadError> {
    let Some(path) = path else {
        tracing::info!("Using built-in pricing catalog");
        return Ok(PricingCatalog::builtin().clone());
    };

    let document = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    PricingCatalog::from_yaml(&document).map_err(|source| CatalogLoadError::Catalog {
        path: path.display().to_string(),
        source,
    })
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog is immutable for
/// the life of the process; resolved per-category pricing is cached.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: PricingCatalog,
    pricing_cache: Cache<String, Arc<CategoryPricing>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: PricingCatalog) -> Self {
        // No TTL: the catalog never changes while the process runs.
        let pricing_cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                pricing_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &PricingCatalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn tax_rate(&self) -> Decimal {
        self.inner.config.tax_rate
    }

    /// Resolved pricing options for a category, cached by category id.
    pub async fn category_pricing(&self, category: &str) -> Arc<CategoryPricing> {
        if let Some(pricing) = self.inner.pricing_cache.get(category).await {
            tracing::debug!(category, "Category pricing cache hit");
            return pricing;
        }

        let pricing = Arc::new(self.inner.catalog.category_pricing(category));
        self.inner
            .pricing_cache
            .insert(category.to_owned(), Arc::clone(&pricing))
            .await;
        pricing
    }

    /// Drop a cached category.
    pub async fn invalidate_category(&self, category: &str) {
        self.inner.pricing_cache.invalidate(category).await;
    }

    /// Drop every cached category.
    pub async fn invalidate_all(&self) {
        self.inner.pricing_cache.invalidate_all();
        self.inner.pricing_cache.run_pending_tasks().await;
    }

    /// Number of cached categories (approximate until pending tasks run).
    #[must_use]
    pub fn cached_categories(&self) -> u64 {
        self.inner.pricing_cache.entry_count()
    }
}
