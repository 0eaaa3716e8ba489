use thiserror::Error;

use crate::catalog::CatalogError;
use crate::domain::ProductId;
use crate::storage::StoreError;

/// Errors that end a cart operation. None of them leave a partial cart behind.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Insufficient stock: requested {requested}, available {available}")]
    StockInsufficient { requested: u64, available: u32 },
    #[error("Product not in cart: {0}")]
    ItemNotFound(ProductId),
    #[error("Catalog provider error: {0}")]
    Provider(#[from] CatalogError),
    #[error("Cart persistence error: {0}")]
    Persistence(#[from] StoreError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
