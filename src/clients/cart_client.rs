use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::domain::{Cart, ProductId, UpdateProductAmount};
use crate::error::CartError;
use crate::messages::CartRequest;

/// Handle for reading and changing the cart.
///
/// All mutations go through the actor; clones share the same actor. Failed
/// operations return the error and have already been reported to the notifier.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    observed: watch::Receiver<Cart>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>, observed: watch::Receiver<Cart>) -> Self {
        Self { sender, observed }
    }

    /// Last committed cart, without a round trip to the actor.
    pub fn cart(&self) -> Cart {
        self.observed.borrow().clone()
    }

    /// Receiver that wakes on every committed change.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.observed.clone()
    }

    /// Asks the actor to stop after the requests already queued.
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(CartClient => fn add_product(product_id: ProductId) -> Cart as CartRequest::AddProduct);
client_method!(CartClient => fn remove_product(product_id: ProductId) -> Cart as CartRequest::RemoveProduct);
client_method!(CartClient => fn update_product_amount(update: UpdateProductAmount) -> Cart as CartRequest::UpdateProductAmount);
client_method!(CartClient => fn snapshot() -> Cart as CartRequest::Snapshot);
