use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

use crate::catalog::{Catalog, CatalogError};
use crate::clients::CartClient;
use crate::domain::{Cart, ProductId, UpdateProductAmount};
use crate::error::CartError;
use crate::messages::{CartRequest, Response};
use crate::notify::{Notice, Notifier, Operation};
use crate::storage::CartStore;

/// Sole owner of the cart.
///
/// Requests are processed strictly one after another, including the catalog
/// lookups they wait on, so every decision is taken against the cart as left by
/// the previous request. A successful mutation is saved first, then committed in
/// memory, then published to subscribers.
pub struct CartActor {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
    catalog: Arc<dyn Catalog>,
    store: CartStore,
    notifier: Arc<dyn Notifier>,
    published: watch::Sender<Cart>,
}

impl CartActor {
    /// Loads the stored cart and returns the actor together with its client.
    ///
    /// No network calls happen here.
    pub fn new(
        buffer_size: usize,
        catalog: Arc<dyn Catalog>,
        store: CartStore,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, CartClient) {
        let cart = store.load();
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (published, observed) = watch::channel(cart.clone());
        let actor = Self {
            receiver,
            cart,
            catalog,
            store,
            notifier,
            published,
        };
        let client = CartClient::new(sender, observed);
        (actor, client)
    }

    #[instrument(name = "cart_actor", skip(self), fields(key = %self.store.key()))]
    pub async fn run(mut self) {
        info!(items = self.cart.len(), "CartActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddProduct { product_id, respond_to } => {
                    let result = self.handle_add_product(product_id).await;
                    self.respond(Operation::Add, result, respond_to);
                }
                CartRequest::RemoveProduct { product_id, respond_to } => {
                    let result = self.handle_remove_product(product_id);
                    self.respond(Operation::Remove, result, respond_to);
                }
                CartRequest::UpdateProductAmount { update, respond_to } => {
                    let result = self.handle_update_product_amount(update).await;
                    self.respond(Operation::Update, result, respond_to);
                }
                CartRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.cart.clone()));
                }
                CartRequest::Shutdown => {
                    info!("CartActor shutting down");
                    break;
                }
            }
        }
        info!("CartActor stopped");
    }

    #[instrument(skip(self))]
    async fn handle_add_product(&mut self, product_id: ProductId) -> Result<Cart, CartError> {
        debug!("Processing add_product request");
        let (product, stock) = tokio::try_join!(
            self.catalog.product(product_id),
            self.catalog.stock(product_id)
        )?;
        if product.id != product_id {
            return Err(CatalogError::Decode(format!(
                "requested product {product_id}, catalog returned {}",
                product.id
            ))
            .into());
        }
        debug!(available = stock.amount, "Stock fetched");

        let next = self.cart.with_added(product, &stock)?;
        self.commit(next)
    }

    #[instrument(skip(self))]
    fn handle_remove_product(&mut self, product_id: ProductId) -> Result<Cart, CartError> {
        debug!("Processing remove_product request");
        let next = self.cart.without(product_id)?;
        self.commit(next)
    }

    #[instrument(skip(self), fields(product_id = update.product_id, amount = update.amount))]
    async fn handle_update_product_amount(
        &mut self,
        update: UpdateProductAmount,
    ) -> Result<Cart, CartError> {
        debug!("Processing update_product_amount request");
        if update.amount < 1 {
            debug!("Amount below 1, ignoring");
            return Ok(self.cart.clone());
        }

        let stock = self.catalog.stock(update.product_id).await?;
        debug!(available = stock.amount, "Stock fetched");

        let next = self
            .cart
            .with_amount(update.product_id, update.amount.unsigned_abs(), &stock)?;
        self.commit(next)
    }

    fn commit(&mut self, next: Cart) -> Result<Cart, CartError> {
        self.store.save(&next)?;
        self.cart = next.clone();
        self.published.send_replace(next.clone());
        Ok(next)
    }

    fn respond(&self, operation: Operation, result: Result<Cart, CartError>, respond_to: Response<Cart>) {
        match &result {
            Ok(cart) => info!(%operation, items = cart.len(), units = cart.total_units(), "Cart operation done"),
            Err(e) => {
                warn!(%operation, error = %e, "Cart operation rejected");
                self.notifier.notify(Notice::for_failure(operation, e));
            }
        }
        let _ = respond_to.send(result);
    }
}
