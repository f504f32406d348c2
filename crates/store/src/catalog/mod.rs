//! Product catalog loading.
//!
//! The store's one network interface. The remote product list is fetched
//! through a [`ProductSource`], cached on success, and substituted by the
//! cached or built-in list on failure, so the shop page always has
//! something to render.

mod http;

pub use http::HttpProductSource;

use thiserror::Error;

use crate::commerce::CommerceStore;
use crate::models::Product;

/// Errors from fetching the remote product list.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The configured endpoint is not a valid URL.
    #[error("invalid catalog endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A source of catalog products.
pub trait ProductSource {
    /// Fetch the product list.
    fn fetch(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

/// Catalog loader binding a source to the store's product cache.
#[derive(Debug, Clone)]
pub struct ProductCatalog<S> {
    store: CommerceStore,
    source: S,
}

impl<S: ProductSource> ProductCatalog<S> {
    #[must_use]
    pub const fn new(store: CommerceStore, source: S) -> Self {
        Self { store, source }
    }

    /// Load products for rendering.
    ///
    /// A successful fetch refreshes the cache; a failed cache write is
    /// logged and the fetched list is served anyway. On fetch failure the
    /// cached list from the last success is served, and with nothing
    /// cached, the built-in fallback list. Loading itself never fails.
    pub async fn load(&self) -> Vec<Product> {
        match self.source.fetch().await {
            Ok(products) => {
                if let Err(error) = self.store.cache_products(&products) {
                    tracing::warn!(%error, "failed to cache fetched products");
                }
                products
            }
            Err(error) => {
                tracing::warn!(%error, "catalog fetch failed, falling back");
                let cached = self.store.cached_products();
                if cached.is_empty() {
                    Product::fallback_list()
                } else {
                    cached
                }
            }
        }
    }
}
