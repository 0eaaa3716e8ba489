//! Read-only access to the product catalog and stock providers.

mod error;
mod http;

pub use error::*;
pub use http::*;

use async_trait::async_trait;

use crate::domain::{ProductId, ProductRecord, StockRecord};

/// Source of product details and current stock levels.
///
/// Every call must hit the provider: the cart never validates against cached stock.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn product(&self, id: ProductId) -> Result<ProductRecord, CatalogError>;
    async fn stock(&self, id: ProductId) -> Result<StockRecord, CatalogError>;
}
