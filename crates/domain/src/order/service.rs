//! Checkout and cancellation service.

use chrono::Utc;
use common::{CartId, OrderId, Page, Pagination, Principal};

use crate::error::{DomainError, DomainResult};
use crate::order::{Order, OrderStatus};
use crate::policy::CheckoutPolicy;
use crate::store::{Store, StoreTx};

/// Service for converting carts into orders and reversing orders.
///
/// Both mutations run as one transaction each: any failure mid-sequence
/// drops the transaction, so no partial stock decrement, half-created
/// order, or dangling status flip is ever observable.
pub struct CheckoutService<S: Store> {
    store: S,
    policy: CheckoutPolicy,
}

impl<S: Store> CheckoutService<S> {
    /// Creates a new checkout service backed by the given store.
    pub fn new(store: S, policy: CheckoutPolicy) -> Self {
        Self { store, policy }
    }

    /// Atomically converts the caller's cart into an order.
    ///
    /// Precondition checks, in order: the cart exists and belongs to the
    /// caller, is in `Created` status, and has at least one item. Then
    /// every line's stock is verified; the first shortfall aborts the
    /// whole call naming the offending product.
    ///
    /// On success the order (status `Completed`, total fixed from the
    /// cart's snapshots) and its items are inserted, each product's stock
    /// is decremented by the line quantity, and the cart flips to `Paid`
    /// — all in one commit.
    #[tracing::instrument(skip(self))]
    pub async fn complete_order(&self, principal: Principal, cart_id: CartId) -> DomainResult<Order> {
        let user_id = principal.user_id;
        let mut tx = self.store.begin().await?;

        let mut cart = tx
            .cart_by_id_and_user(user_id, cart_id)
            .await?
            .ok_or(DomainError::CartNotFound)?;
        if !cart.status().can_checkout() {
            return Err(DomainError::InvalidCartState {
                status: cart.status(),
            });
        }
        if cart.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        // Validate every line before writing anything.
        for item in cart.items() {
            let product_id = item.product_id;
            let product = tx
                .product(product_id)
                .await?
                .ok_or(DomainError::ProductNotFound { product_id })?;
            if !product.has_stock(item.quantity) {
                metrics::counter!("checkout_stock_rejections_total").increment(1);
                return Err(DomainError::InsufficientStock {
                    product_id,
                    requested: item.quantity,
                    available: product.stock,
                });
            }
        }

        let order = Order::from_cart(&cart, Utc::now());
        tx.insert_order(&order).await?;
        for item in order.items() {
            tx.adjust_stock(item.product_id, -i64::from(item.quantity))
                .await?;
        }
        cart.mark_paid();
        tx.update_cart(&cart).await?;
        tx.commit().await?;

        metrics::counter!("orders_completed_total").increment(1);
        tracing::info!(order_id = %order.id(), %cart_id, total = %order.total(), "order completed");
        Ok(order)
    }

    /// Atomically reverses a completed order within the cancellation
    /// window.
    ///
    /// Restores each product's stock by the line quantity and flips the
    /// order to `Canceled`. An order that is already canceled or whose
    /// window has passed fails with `OrderCannotBeCanceled`, distinct
    /// from `OrderNotFound` so callers can render the right message.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, principal: Principal, order_id: OrderId) -> DomainResult<()> {
        let user_id = principal.user_id;
        let mut tx = self.store.begin().await?;

        let order = tx
            .order_by_id_and_user(user_id, order_id)
            .await?
            .ok_or(DomainError::OrderNotFound)?;
        if !order.is_cancelable(Utc::now(), self.policy.cancellation_window) {
            return Err(DomainError::OrderCannotBeCanceled);
        }

        for item in order.items() {
            tx.adjust_stock(item.product_id, i64::from(item.quantity))
                .await?;
        }
        tx.set_order_status(order_id, OrderStatus::Canceled).await?;
        tx.commit().await?;

        metrics::counter!("orders_canceled_total").increment(1);
        tracing::info!(%order_id, "order canceled");
        Ok(())
    }

    /// Point lookup of an order, scoped to its owner.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, principal: Principal, order_id: OrderId) -> DomainResult<Order> {
        let mut tx = self.store.begin().await?;
        tx.order_by_id_and_user(principal.user_id, order_id)
            .await?
            .ok_or(DomainError::OrderNotFound)
    }

    /// The caller's orders, newest first.
    ///
    /// A caller with no orders at all gets `OrderNotFound`; a page past
    /// the end of a non-empty history is an empty page.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders(
        &self,
        principal: Principal,
        pagination: Pagination,
    ) -> DomainResult<Page<Order>> {
        let mut tx = self.store.begin().await?;
        let (orders, total) = tx.orders_by_user(principal.user_id, pagination).await?;
        if total == 0 {
            return Err(DomainError::OrderNotFound);
        }
        Ok(Page::new(orders, pagination, total))
    }
}
