//! Cart aggregate.

use common::{CartId, CartItemId, Money, ProductId, UserId};
use serde::{Deserialize, Serialize};

use super::CartStatus;

/// A line item inside a cart.
///
/// `unit_price` is a snapshot taken when the line was last mutated, not a
/// live read of the product price. It is what the order will copy at
/// conversion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Money,
}

impl CartItem {
    /// Total price for this line (unit price times quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// A user's in-progress selection of products.
///
/// At most one `Created`-status cart exists per user; the store enforces
/// that uniqueness, `CartService::get_or_create_cart` relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    id: CartId,
    user_id: UserId,
    status: CartStatus,
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart for a user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            id: CartId::new(),
            user_id,
            status: CartStatus::Created,
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> CartId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn status(&self) -> CartStatus {
        self.status
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line totals. Computed on demand, never cached.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Returns the item with the given id, if present.
    pub fn find_item(&self, item_id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Quantity of a product already in the cart, zero if absent.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.items
            .iter()
            .filter(|item| item.product_id == product_id)
            .map(|item| item.quantity)
            .sum()
    }

    /// Adds `quantity` units of a product, merging with an existing line.
    ///
    /// The line's price snapshot is refreshed to `unit_price` on every
    /// mutation. Returns the id of the affected line.
    pub fn put_item(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        unit_price: Money,
    ) -> CartItemId {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            existing.quantity += quantity;
            existing.unit_price = unit_price;
            existing.id
        } else {
            let item = CartItem {
                id: CartItemId::new(),
                cart_id: self.id,
                product_id,
                quantity,
                unit_price,
            };
            let id = item.id;
            self.items.push(item);
            id
        }
    }

    /// Replaces a line's quantity and refreshes its price snapshot.
    ///
    /// Returns false if no line with that id exists.
    pub fn set_item_quantity(
        &mut self,
        item_id: CartItemId,
        quantity: u32,
        unit_price: Money,
    ) -> bool {
        match self.items.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.quantity = quantity;
                item.unit_price = unit_price;
                true
            }
            None => false,
        }
    }

    /// Removes a line. Returns false if no line with that id exists.
    pub fn remove_item(&mut self, item_id: CartItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != item_id);
        self.items.len() != before
    }

    /// Applies the one legal transition, `Created → Paid`.
    ///
    /// Returns false (and leaves the cart untouched) for anything else.
    pub fn mark_paid(&mut self) -> bool {
        if self.status.can_checkout() {
            self.status = CartStatus::Paid;
            true
        } else {
            false
        }
    }
}
