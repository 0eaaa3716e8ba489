//! Durable cart snapshot.
//!
//! The cart lives in a single named slot holding a JSON array of line items.
//! It is read once when the manager starts and overwritten after every
//! successful mutation.

mod backend;
mod error;

pub use backend::*;
pub use error::*;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::Cart;

/// Slot key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// Loads and saves cart snapshots in one storage slot.
#[derive(Debug, Clone)]
pub struct CartStore {
    storage: Arc<dyn Storage>,
    key: String,
}

impl CartStore {
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Store over an in-process slot with the default key.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), DEFAULT_CART_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Last saved cart, or an empty cart.
    ///
    /// A missing, unreadable or malformed slot never fails: it yields an empty cart
    /// and only leaves a `warn!` in the logs.
    pub fn load(&self) -> Cart {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No stored cart, starting empty");
                return Cart::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored cart unreadable, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                debug!(key = %self.key, items = cart.len(), "Loaded stored cart");
                cart
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored cart corrupt, starting empty");
                Cart::new()
            }
        }
    }

    /// Overwrites the slot with the full `cart`.
    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        let raw = serde_json::to_string(cart).map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.storage.put(&self.key, &raw)?;
        debug!(key = %self.key, items = cart.len(), "Saved cart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProductRecord, StockRecord};

    fn store_with(raw: &str) -> CartStore {
        let storage = MemoryStorage::new();
        storage.put(DEFAULT_CART_KEY, raw).unwrap();
        CartStore::new(Arc::new(storage), DEFAULT_CART_KEY)
    }

    #[test]
    fn load_after_save_returns_the_same_cart() {
        let store = CartStore::in_memory();
        let product = ProductRecord::new(1)
            .with_attribute("title", "Tenis de Caminhada")
            .with_attribute("image", "https://img/1.jpg");
        let cart = Cart::new()
            .with_added(product, &StockRecord::new(1, 2))
            .unwrap()
            .with_added(ProductRecord::new(2), &StockRecord::new(2, 1))
            .unwrap();

        store.save(&cart).unwrap();
        assert_eq!(store.load(), cart);
    }

    #[test]
    fn missing_slot_loads_empty() {
        assert!(CartStore::in_memory().load().is_empty());
    }

    #[test]
    fn corrupt_slot_loads_empty() {
        assert!(store_with("{not json").load().is_empty());
        assert!(store_with(r#"{"id":1,"amount":1}"#).load().is_empty());
        assert!(store_with(r#"[{"id":"one","amount":1}]"#).load().is_empty());
    }

    #[test]
    fn slot_breaking_cart_invariants_loads_empty() {
        assert!(store_with(r#"[{"id":1,"amount":1},{"id":1,"amount":1}]"#).load().is_empty());
        assert!(store_with(r#"[{"id":1,"amount":0}]"#).load().is_empty());
    }

    #[test]
    fn file_backed_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let cart = Cart::new()
            .with_added(ProductRecord::new(5), &StockRecord::new(5, 1))
            .unwrap();

        CartStore::new(Arc::new(FileStorage::new(dir.path())), "cart")
            .save(&cart)
            .unwrap();

        let reopened = CartStore::new(Arc::new(FileStorage::new(dir.path())), "cart");
        assert_eq!(reopened.load(), cart);
    }
}
