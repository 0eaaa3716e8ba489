//! HTTP catalog client.
//!
//! Talks to a JSON API exposing `GET /products/{id}` and `GET /stock/{id}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{Catalog, CatalogError};
use crate::domain::{ProductId, ProductRecord, StockRecord};

/// Catalog backed by a REST API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Create a client for the API rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<ProductRecord, CatalogError> {
        let product: ProductRecord = self.get_json(&format!("/products/{id}")).await?;
        debug!(attributes = product.attributes.len(), "Fetched product");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn stock(&self, id: ProductId) -> Result<StockRecord, CatalogError> {
        let stock: StockRecord = self.get_json(&format!("/stock/{id}")).await?;
        debug!(available = stock.amount, "Fetched stock");
        Ok(StockRecord::new(id, stock.amount))
    }
}
