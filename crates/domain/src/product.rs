//! Product entity and its stock ledger.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// `stock` is the only mutable part and is adjusted exclusively through
/// `StoreTx::adjust_stock` during order completion and cancellation, so
/// concurrent adjustments serialize at the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub stock: u32,
}

impl Product {
    /// Creates a new product with an initial stock level.
    pub fn new(name: impl Into<String>, price: Money, stock: u32) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            price,
            stock,
        }
    }

    /// Returns true if at least `quantity` units are available.
    pub fn has_stock(&self, quantity: u32) -> bool {
        self.stock >= quantity
    }
}
