pub mod cart;
pub mod records;

pub use cart::*;
pub use records::*;
