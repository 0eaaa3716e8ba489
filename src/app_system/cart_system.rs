use std::sync::Arc;

use tracing::{error, info};

use crate::cart_actor::CartActor;
use crate::catalog::{Catalog, HttpCatalog};
use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::notify::Notifier;
use crate::storage::{CartStore, FileStorage};

const DEFAULT_BUFFER_SIZE: usize = 32;

/// The running cart manager: the actor task plus a client to talk to it.
///
/// Must be created inside a tokio runtime.
pub struct CartSystem {
    pub cart_client: CartClient,
    handle: tokio::task::JoinHandle<()>,
}

impl CartSystem {
    pub fn new(catalog: Arc<dyn Catalog>, store: CartStore, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE, catalog, store, notifier)
    }

    /// A `buffer_size` of 0 is raised to 1.
    pub fn with_buffer_size(
        buffer_size: usize,
        catalog: Arc<dyn Catalog>,
        store: CartStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (actor, cart_client) = CartActor::new(buffer_size.max(1), catalog, store, notifier);
        let handle = tokio::spawn(actor.run());
        Self { cart_client, handle }
    }

    /// HTTP catalog and file-backed slot as described by `config`.
    pub fn from_config(config: &CartConfig, notifier: Arc<dyn Notifier>) -> Self {
        let catalog = Arc::new(HttpCatalog::new(config.api_url.clone()));
        let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        let store = CartStore::new(storage, config.storage_key.clone());
        Self::with_buffer_size(config.queue_capacity, catalog, store, notifier)
    }

    /// Stops the actor once queued requests are done and waits for it.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart system...");
        if let Err(e) = self.cart_client.shutdown().await {
            // actor already gone; the join below reports why
            error!(error = %e, "Could not deliver shutdown");
        }
        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Cart system shutdown complete.");
        Ok(())
    }
}
