use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::records::{Attributes, ProductId, ProductRecord, StockRecord};
use crate::error::CartError;

/// One product in the cart plus the quantity the user intends to buy.
///
/// Serialized flat, so a stored line item reads like the catalog product with an
/// extra `amount` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    #[serde(flatten)]
    pub attributes: Attributes,
    pub amount: u32,
}

impl LineItem {
    /// Builds a line item from a catalog product.
    ///
    /// Any `id` or `amount` keys inside the product attributes are dropped so the
    /// line item's own fields stay authoritative.
    pub fn from_product(product: ProductRecord, amount: u32) -> Self {
        let mut attributes = product.attributes;
        attributes.remove("id");
        attributes.remove("amount");
        Self {
            id: product.id,
            attributes,
            amount,
        }
    }
}

/// A stored snapshot that parses but breaks the cart invariants.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvalidCart {
    #[error("duplicate line item for product {0}")]
    DuplicateItem(ProductId),
    #[error("line item for product {0} has amount 0")]
    EmptyItem(ProductId),
}

/// Ordered, id-unique collection of line items. Insertion order is display order.
///
/// A `Cart` is never edited in place by callers: every operation returns the
/// candidate next cart and leaves `self` untouched, so a failed step cannot leave
/// a half-applied state behind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = InvalidCart;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        for (index, item) in items.iter().enumerate() {
            if item.amount == 0 {
                return Err(InvalidCart::EmptyItem(item.id));
            }
            if items[..index].iter().any(|other| other.id == item.id) {
                return Err(InvalidCart::DuplicateItem(item.id));
            }
        }
        Ok(Self { items })
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line item amounts.
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Cart with one more unit of `product`.
    ///
    /// Increments the existing line item when stock allows it, otherwise appends a
    /// new line item with amount 1.
    ///
    /// # Errors
    /// `StockInsufficient` if the stock cannot cover one more unit.
    pub fn with_added(&self, product: ProductRecord, stock: &StockRecord) -> Result<Cart, CartError> {
        let current = self.get(product.id).map_or(0, |item| item.amount);
        if stock.amount <= current {
            return Err(CartError::StockInsufficient {
                requested: u64::from(current) + 1,
                available: stock.amount,
            });
        }

        let mut next = self.clone();
        match next.items.iter_mut().find(|item| item.id == product.id) {
            Some(item) => item.amount += 1,
            None => next.items.push(LineItem::from_product(product, 1)),
        }
        Ok(next)
    }

    /// Cart without the line item for `id`.
    ///
    /// # Errors
    /// `ItemNotFound` if the product is not in the cart.
    pub fn without(&self, id: ProductId) -> Result<Cart, CartError> {
        if !self.contains(id) {
            return Err(CartError::ItemNotFound(id));
        }
        let items = self.items.iter().filter(|item| item.id != id).cloned().collect();
        Ok(Self { items })
    }

    /// Cart with the line item for `id` set to exactly `requested` units.
    ///
    /// Stock is checked before membership.
    ///
    /// # Errors
    /// `StockInsufficient` if `requested` exceeds the stock, `ItemNotFound` if the
    /// product is not in the cart.
    pub fn with_amount(
        &self,
        id: ProductId,
        requested: u64,
        stock: &StockRecord,
    ) -> Result<Cart, CartError> {
        let insufficient = CartError::StockInsufficient {
            requested,
            available: stock.amount,
        };
        if requested > u64::from(stock.amount) {
            return Err(insufficient);
        }
        let amount = u32::try_from(requested).map_err(|_| insufficient)?;

        let mut next = self.clone();
        let item = next
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(CartError::ItemNotFound(id))?;
        item.amount = amount;
        Ok(next)
    }
}
