//! System wiring, startup, and shutdown logic.

pub mod cart_system;
pub mod telemetry;

pub use cart_system::*;
pub use telemetry::*;
