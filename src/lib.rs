//! Client-side shopping cart manager.
//!
//! A single [`CartActor`](cart_actor::CartActor) owns the cart, validates every
//! change against live stock from a [`Catalog`](catalog::Catalog), persists the
//! result through a [`CartStore`](storage::CartStore) and reports failures to a
//! [`Notifier`](notify::Notifier). Consumers talk to it through a
//! [`CartClient`](clients::CartClient).

pub mod app_system;
pub mod cart_actor;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod messages;
pub mod notify;
pub mod storage;

#[cfg(test)]
mod mock_framework;

pub use app_system::{setup_tracing, CartSystem};
pub use clients::CartClient;
pub use domain::{Cart, LineItem, ProductId, ProductRecord, StockRecord, UpdateProductAmount};
pub use error::CartError;
