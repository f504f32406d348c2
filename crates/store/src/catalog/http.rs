//! Product source backed by the public catalog endpoint.

use url::Url;

use crate::config::CatalogConfig;
use crate::models::Product;

use super::{CatalogError, ProductSource};

/// Fetches the product list over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: reqwest::Client,
    endpoint: Url,
    limit: u32,
}

impl HttpProductSource {
    /// Create a source for the given endpoint.
    #[must_use]
    pub fn new(endpoint: Url, limit: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            limit,
        }
    }

    /// Create a source from the catalog configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidEndpoint`] if the configured endpoint
    /// does not parse as a URL.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let endpoint = Url::parse(&config.endpoint)?;
        Ok(Self::new(endpoint, config.limit))
    }
}

impl ProductSource for HttpProductSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let products = self
            .client
            .get(self.endpoint.clone())
            .query(&[("limit", self.limit)])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Product>>()
            .await?;
        Ok(products)
    }
}
