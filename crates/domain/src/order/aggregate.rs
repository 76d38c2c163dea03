//! Order aggregate.

use chrono::{DateTime, Duration, Utc};
use common::{CartId, Money, OrderId, OrderItemId, ProductId, UserId};
use serde::{Deserialize, Serialize};

use super::OrderStatus;
use crate::cart::Cart;

/// A line item inside an order.
///
/// `unit_price` and `quantity` are copied from the corresponding cart
/// item at conversion time and never recomputed from the live product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Money,
}

impl OrderItem {
    /// Total price for this line (unit price times quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// An immutable record of a completed checkout.
///
/// Total and items are fixed at construction; the status is the only
/// field that ever changes, and only `Completed → Canceled` is legal.
/// The source cart is referenced by id, not held as a live object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    cart_id: CartId,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    total: Money,
    items: Vec<OrderItem>,
}

impl Order {
    /// Builds an order from a cart, snapshotting every line.
    ///
    /// The total is computed here, once, and stored; it is never
    /// recalculated later. The caller is responsible for having validated
    /// the cart (status, non-emptiness, stock).
    pub fn from_cart(cart: &Cart, created_at: DateTime<Utc>) -> Self {
        let id = OrderId::new();
        let items: Vec<OrderItem> = cart
            .items()
            .iter()
            .map(|item| OrderItem {
                id: OrderItemId::new(),
                order_id: id,
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect();
        let total = items.iter().map(OrderItem::line_total).sum();

        Self {
            id,
            user_id: cart.user_id(),
            cart_id: cart.id(),
            status: OrderStatus::Completed,
            created_at,
            total,
            items,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn cart_id(&self) -> CartId {
        self.cart_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The fixed total, Σ(line price × quantity) at conversion time.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Items in conversion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns true iff the order is `Completed` and `now` is still
    /// within `window` of its creation. Pure predicate; the window value
    /// comes from `CheckoutPolicy`.
    pub fn is_cancelable(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.status.can_cancel() && now - self.created_at <= window
    }

    /// Moves the order to `status` if that transition is legal.
    ///
    /// Returns false (and leaves the order untouched) otherwise. This is
    /// the only mutation an order supports.
    pub fn transition_to(&mut self, status: OrderStatus) -> bool {
        if self.status.can_transition_to(status) {
            self.status = status;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkout_ready_cart() -> Cart {
        let mut cart = Cart::new(UserId::new());
        cart.put_item(ProductId::new(), 2, Money::from_cents(1000));
        cart.put_item(ProductId::new(), 1, Money::from_cents(550));
        cart
    }

    #[test]
    fn from_cart_snapshots_lines_and_total() {
        let cart = checkout_ready_cart();
        let order = Order::from_cart(&cart, Utc::now());

        assert_eq!(order.status(), OrderStatus::Completed);
        assert_eq!(order.user_id(), cart.user_id());
        assert_eq!(order.cart_id(), cart.id());
        assert_eq!(order.items().len(), 2);
        assert_eq!(order.total(), Money::from_cents(2550));

        for (order_item, cart_item) in order.items().iter().zip(cart.items()) {
            assert_eq!(order_item.order_id, order.id());
            assert_eq!(order_item.product_id, cart_item.product_id);
            assert_eq!(order_item.quantity, cart_item.quantity);
            assert_eq!(order_item.unit_price, cart_item.unit_price);
        }
    }

    #[test]
    fn cancelable_within_window() {
        let order = Order::from_cart(&checkout_ready_cart(), Utc::now());
        assert!(order.is_cancelable(Utc::now(), Duration::days(14)));
    }

    #[test]
    fn not_cancelable_past_window() {
        let created = Utc::now() - Duration::days(15);
        let order = Order::from_cart(&checkout_ready_cart(), created);
        assert!(!order.is_cancelable(Utc::now(), Duration::days(14)));
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let now = Utc::now();
        let order = Order::from_cart(&checkout_ready_cart(), now - Duration::days(14));
        assert!(order.is_cancelable(now, Duration::days(14)));
        assert!(!order.is_cancelable(now + Duration::seconds(1), Duration::days(14)));
    }

    #[test]
    fn canceled_order_is_never_cancelable() {
        let mut order = Order::from_cart(&checkout_ready_cart(), Utc::now());
        assert!(order.transition_to(OrderStatus::Canceled));
        assert!(!order.is_cancelable(Utc::now(), Duration::days(14)));
    }

    #[test]
    fn transition_rejects_everything_but_cancellation() {
        let mut order = Order::from_cart(&checkout_ready_cart(), Utc::now());
        assert!(!order.transition_to(OrderStatus::Completed));
        assert!(order.transition_to(OrderStatus::Canceled));
        assert!(!order.transition_to(OrderStatus::Canceled));
        assert_eq!(order.status(), OrderStatus::Canceled);
    }
}
