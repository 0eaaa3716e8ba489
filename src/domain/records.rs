use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier shared by products, stock entries and line items.
pub type ProductId = u64;

/// Opaque product attributes (title, price, image, ...) carried through the cart untouched.
pub type Attributes = Map<String, Value>;

/// A product as returned by the catalog provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl ProductRecord {
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            attributes: Attributes::new(),
        }
    }

    /// Adds an attribute, builder style.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Available quantity for a product, as returned by the stock provider.
///
/// Providers may answer with just `{"amount": n}`; the catalog client fills `id`
/// from the id it asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    #[serde(default)]
    pub id: ProductId,
    pub amount: u32,
}

impl StockRecord {
    pub fn new(id: ProductId, amount: u32) -> Self {
        Self { id, amount }
    }
}

/// Payload for setting the quantity of a line item.
///
/// `amount` is signed on purpose: callers such as a decrement button may ask for
/// zero or a negative value, which the cart treats as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }
}
