use tokio::sync::oneshot;

use crate::domain::{Cart, ProductId, UpdateProductAmount};
use crate::error::CartError;

/// Reply channel carrying the cart after the request was applied.
pub type Response<T> = oneshot::Sender<Result<T, CartError>>;

/// Requests handled by the cart actor, one at a time, in arrival order.
#[derive(Debug)]
pub enum CartRequest {
    AddProduct {
        product_id: ProductId,
        respond_to: Response<Cart>,
    },
    RemoveProduct {
        product_id: ProductId,
        respond_to: Response<Cart>,
    },
    UpdateProductAmount {
        update: UpdateProductAmount,
        respond_to: Response<Cart>,
    },
    Snapshot {
        respond_to: Response<Cart>,
    },
    Shutdown,
}
