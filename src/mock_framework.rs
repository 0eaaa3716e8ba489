//! # Mock Framework
//!
//! Test doubles for the cart's collaborators.
//!
//! Use [`create_mock_catalog`] to get a catalog and a receiver of its lookups, then
//! answer each lookup with [`expect_product`] / [`expect_stock`]. For tests that only
//! need fixed data use [`StaticCatalog`]. [`RecordingNotifier`] keeps every notice.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::catalog::{Catalog, CatalogError};
use crate::domain::{ProductId, ProductRecord, StockRecord};
use crate::notify::{Notice, Notifier};
use crate::storage::{Storage, StoreError};

pub type Reply<T> = oneshot::Sender<Result<T, CatalogError>>;

/// A lookup made through [`MockCatalog`].
#[derive(Debug)]
pub enum CatalogRequest {
    Product {
        id: ProductId,
        respond_to: Reply<ProductRecord>,
    },
    Stock {
        id: ProductId,
        respond_to: Reply<StockRecord>,
    },
}

/// Catalog whose every lookup is answered by the test.
#[derive(Clone)]
pub struct MockCatalog {
    sender: mpsc::Sender<CatalogRequest>,
}

/// Creates a mock catalog and a receiver for asserting and answering lookups.
///
/// # Testing Strategy
/// Holding the receiver lets a test decide, per lookup, whether the provider
/// succeeds, fails or never answers, and observe that no lookup happened at all.
pub fn create_mock_catalog(buffer_size: usize) -> (MockCatalog, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockCatalog { sender }, receiver)
}

impl MockCatalog {
    async fn ask<T>(&self, make: impl FnOnce(Reply<T>) -> CatalogRequest) -> Result<T, CatalogError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| CatalogError::Request("mock catalog closed".to_string()))?;
        response
            .await
            .map_err(|_| CatalogError::Request("mock catalog dropped reply".to_string()))?
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn product(&self, id: ProductId) -> Result<ProductRecord, CatalogError> {
        self.ask(|respond_to| CatalogRequest::Product { id, respond_to }).await
    }

    async fn stock(&self, id: ProductId) -> Result<StockRecord, CatalogError> {
        self.ask(|respond_to| CatalogRequest::Stock { id, respond_to }).await
    }
}

/// Helper to verify that the next lookup is a product fetch
pub async fn expect_product(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(ProductId, Reply<ProductRecord>)> {
    match receiver.recv().await {
        Some(CatalogRequest::Product { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next lookup is a stock fetch
pub async fn expect_stock(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(ProductId, Reply<StockRecord>)> {
    match receiver.recv().await {
        Some(CatalogRequest::Stock { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Answers the product and stock lookups of one add, in whichever order they arrive.
///
/// Returns the ids that were asked for.
pub async fn answer_add_lookups(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
    product: Result<ProductRecord, CatalogError>,
    stock: Result<StockRecord, CatalogError>,
) -> Vec<ProductId> {
    let mut product = Some(product);
    let mut stock = Some(stock);
    let mut asked = Vec::new();
    while product.is_some() || stock.is_some() {
        match receiver.recv().await {
            Some(CatalogRequest::Product { id, respond_to }) => {
                asked.push(id);
                if let Some(reply) = product.take() {
                    let _ = respond_to.send(reply);
                }
            }
            Some(CatalogRequest::Stock { id, respond_to }) => {
                asked.push(id);
                if let Some(reply) = stock.take() {
                    let _ = respond_to.send(reply);
                }
            }
            None => break,
        }
    }
    asked
}

/// Catalog serving fixed records. Unknown ids answer with a 404.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Arc<Mutex<HashMap<ProductId, ProductRecord>>>,
    stock: Arc<Mutex<HashMap<ProductId, u32>>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(self, product: ProductRecord, stock: u32) -> Self {
        self.set_stock(product.id, stock);
        self.products.lock().unwrap().insert(product.id, product);
        self
    }

    pub fn set_stock(&self, id: ProductId, amount: u32) {
        self.stock.lock().unwrap().insert(id, amount);
    }

    fn not_found(path: String) -> CatalogError {
        CatalogError::Status { status: 404, path }
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn product(&self, id: ProductId) -> Result<ProductRecord, CatalogError> {
        let products = self.products.lock().unwrap();
        products
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("/products/{id}")))
    }

    async fn stock(&self, id: ProductId) -> Result<StockRecord, CatalogError> {
        let stock = self.stock.lock().unwrap();
        stock
            .get(&id)
            .map(|&amount| StockRecord::new(id, amount))
            .ok_or_else(|| Self::not_found(format!("/stock/{id}")))
    }
}

/// Notifier that remembers every notice.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// Storage that reads nothing and refuses every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnlyStorage;

impl Storage for ReadOnlyStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn put(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io("read-only file system".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_catalog() {
        let (catalog, mut receiver) = create_mock_catalog(10);

        let lookup = tokio::spawn(async move { catalog.stock(7).await });

        let (id, responder) = expect_stock(&mut receiver).await.expect("Expected Stock lookup");
        assert_eq!(id, 7);
        responder.send(Ok(StockRecord::new(7, 2))).unwrap();

        let result = lookup.await.unwrap();
        assert_eq!(result, Ok(StockRecord::new(7, 2)));
    }

    #[tokio::test]
    async fn test_mock_catalog_product_failure() {
        let (catalog, mut receiver) = create_mock_catalog(10);

        let lookup = tokio::spawn(async move { catalog.product(3).await });

        let (id, responder) = expect_product(&mut receiver).await.expect("Expected Product lookup");
        assert_eq!(id, 3);
        responder
            .send(Err(CatalogError::Status { status: 500, path: "/products/3".to_string() }))
            .unwrap();

        let result = lookup.await.unwrap();
        assert!(matches!(result, Err(CatalogError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_static_catalog_unknown_id() {
        let catalog = StaticCatalog::new().with_product(ProductRecord::new(1), 3);

        assert_eq!(catalog.stock(1).await.unwrap().amount, 3);
        assert!(matches!(
            catalog.product(2).await,
            Err(CatalogError::Status { status: 404, .. })
        ));
    }
}
