//! Transactional repository boundary.
//!
//! The services never touch storage directly; they run against these
//! traits. A [`Store`] opens transactions, a [`StoreTx`] exposes the
//! individual reads and writes and makes them visible to the rest of the
//! system only on [`StoreTx::commit`]. Dropping a transaction without
//! committing discards every staged write, which is how the services roll
//! back: return early with `?` and the transaction falls out of scope.

use async_trait::async_trait;
use common::{CartId, OrderId, Pagination, ProductId, UserId};
use thiserror::Error;

use crate::cart::Cart;
use crate::order::{Order, OrderStatus};
use crate::product::Product;

/// Errors raised by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated (e.g. a second open cart for
    /// the same user).
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A stock adjustment would have taken a product's stock below zero.
    #[error("stock adjustment rejected for product {product_id}: would go negative")]
    StockConflict { product_id: ProductId },

    /// A write referenced a row that does not exist.
    #[error("row not found: {0}")]
    RowNotFound(String),

    /// A write requested an illegal state transition.
    #[error("conflicting write: {0}")]
    Conflict(String),

    /// The storage backend itself failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A handle that can open transactions.
///
/// Implementations must be thread-safe; one `Store` is shared across all
/// concurrent requests.
#[async_trait]
pub trait Store: Send + Sync {
    type Tx: StoreTx;

    /// Opens a new transaction.
    async fn begin(&self) -> StoreResult<Self::Tx>;
}

/// One unit of work against the store.
///
/// Every read observes a consistent snapshot; every write stays invisible
/// to other transactions until `commit`. Transactions touching the same
/// rows serialize: two checkouts racing for the last unit of a product
/// cannot both see stock available and both commit a decrement.
#[async_trait]
pub trait StoreTx: Send {
    /// The user's `Created`-status cart, if one exists. Items populated.
    async fn cart_for_user(&mut self, user_id: UserId) -> StoreResult<Option<Cart>>;

    /// Point lookup of a cart scoped to its owner. Items populated.
    /// A cart owned by someone else is reported as absent.
    async fn cart_by_id_and_user(
        &mut self,
        user_id: UserId,
        cart_id: CartId,
    ) -> StoreResult<Option<Cart>>;

    /// Inserts a new cart. Fails with `UniqueViolation` if the user
    /// already has a `Created`-status cart.
    async fn insert_cart(&mut self, cart: &Cart) -> StoreResult<()>;

    /// Replaces a cart's items and status with the given state.
    async fn update_cart(&mut self, cart: &Cart) -> StoreResult<()>;

    /// A product with its current stock level.
    async fn product(&mut self, product_id: ProductId) -> StoreResult<Option<Product>>;

    /// All products in the catalog.
    async fn products(&mut self) -> StoreResult<Vec<Product>>;

    /// Inserts a new product.
    async fn insert_product(&mut self, product: &Product) -> StoreResult<()>;

    /// Atomically adjusts a product's stock by a signed delta.
    ///
    /// Fails with `StockConflict` if the result would be negative; the
    /// stock level is left untouched in that case.
    async fn adjust_stock(&mut self, product_id: ProductId, delta: i64) -> StoreResult<()>;

    /// Inserts a new order together with its items.
    async fn insert_order(&mut self, order: &Order) -> StoreResult<()>;

    /// Point lookup of an order scoped to its owner.
    async fn order_by_id_and_user(
        &mut self,
        user_id: UserId,
        order_id: OrderId,
    ) -> StoreResult<Option<Order>>;

    /// The user's orders, newest first, plus the total count across all
    /// pages.
    async fn orders_by_user(
        &mut self,
        user_id: UserId,
        pagination: Pagination,
    ) -> StoreResult<(Vec<Order>, u64)>;

    /// Sets an order's status. Fails with `Conflict` if the transition is
    /// not legal for the stored order.
    async fn set_order_status(&mut self, order_id: OrderId, status: OrderStatus)
    -> StoreResult<()>;

    /// Publishes every staged write atomically.
    async fn commit(self) -> StoreResult<()>;
}
