//! Transactional in-memory implementation of the store boundary.
//!
//! `InMemoryStore` provides the same contract a relational backend would:
//! serialized transactions, all-or-nothing commits, and constraint
//! enforcement (cart uniqueness, non-negative stock). A transaction takes
//! the store's single lock and stages its writes on a copy of the state;
//! `commit` publishes the copy, dropping the transaction discards it.
//!
//! Holding the lock for the transaction's lifetime makes transactions
//! fully serialized, which is a correct (if coarse) realization of the
//! concurrency contract: two checkouts racing for the last unit of a
//! product resolve to exactly one winner.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use common::{CartId, OrderId, Pagination, ProductId, UserId};
use domain::{
    Cart, CartStatus, Order, OrderStatus, Product, Store, StoreError, StoreResult, StoreTx,
};

#[derive(Debug, Clone, Default)]
struct State {
    products: HashMap<ProductId, Product>,
    carts: HashMap<CartId, Cart>,
    orders: HashMap<OrderId, Order>,
}

impl State {
    fn open_cart_for_user(&self, user_id: UserId) -> Option<&Cart> {
        self.carts
            .values()
            .find(|cart| cart.user_id() == user_id && cart.status() == CartStatus::Created)
    }
}

/// In-memory store. Cheap to clone; clones share state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Test convenience: inserts or replaces a product outside any
    /// caller-visible transaction.
    pub async fn seed_product(&self, product: Product) {
        self.state.lock().await.products.insert(product.id, product);
    }

    /// Test convenience: current stock for a product.
    pub async fn stock_of(&self, product_id: ProductId) -> Option<u32> {
        self.state
            .lock()
            .await
            .products
            .get(&product_id)
            .map(|p| p.stock)
    }
}

#[async_trait]
impl Store for InMemoryStore {
    type Tx = InMemoryTx;

    async fn begin(&self) -> StoreResult<InMemoryTx> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let work = guard.clone();
        Ok(InMemoryTx { guard, work })
    }
}

/// A transaction over `InMemoryStore`.
///
/// Reads and writes go to `work`, a copy of the shared state taken at
/// `begin`; `commit` moves the copy back behind the lock.
pub struct InMemoryTx {
    guard: OwnedMutexGuard<State>,
    work: State,
}

#[async_trait]
impl StoreTx for InMemoryTx {
    async fn cart_for_user(&mut self, user_id: UserId) -> StoreResult<Option<Cart>> {
        Ok(self.work.open_cart_for_user(user_id).cloned())
    }

    async fn cart_by_id_and_user(
        &mut self,
        user_id: UserId,
        cart_id: CartId,
    ) -> StoreResult<Option<Cart>> {
        Ok(self
            .work
            .carts
            .get(&cart_id)
            .filter(|cart| cart.user_id() == user_id)
            .cloned())
    }

    async fn insert_cart(&mut self, cart: &Cart) -> StoreResult<()> {
        // Unique constraint simulation: one Created cart per user.
        if cart.status() == CartStatus::Created
            && self.work.open_cart_for_user(cart.user_id()).is_some()
        {
            return Err(StoreError::UniqueViolation(format!(
                "user {} already has an open cart",
                cart.user_id()
            )));
        }
        if self.work.carts.contains_key(&cart.id()) {
            return Err(StoreError::UniqueViolation(format!(
                "cart {} already exists",
                cart.id()
            )));
        }
        self.work.carts.insert(cart.id(), cart.clone());
        Ok(())
    }

    async fn update_cart(&mut self, cart: &Cart) -> StoreResult<()> {
        if !self.work.carts.contains_key(&cart.id()) {
            return Err(StoreError::RowNotFound(format!("cart {}", cart.id())));
        }
        self.work.carts.insert(cart.id(), cart.clone());
        Ok(())
    }

    async fn product(&mut self, product_id: ProductId) -> StoreResult<Option<Product>> {
        Ok(self.work.products.get(&product_id).cloned())
    }

    async fn products(&mut self) -> StoreResult<Vec<Product>> {
        let mut products: Vec<Product> = self.work.products.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn insert_product(&mut self, product: &Product) -> StoreResult<()> {
        if self.work.products.contains_key(&product.id) {
            return Err(StoreError::UniqueViolation(format!(
                "product {} already exists",
                product.id
            )));
        }
        self.work.products.insert(product.id, product.clone());
        Ok(())
    }

    async fn adjust_stock(&mut self, product_id: ProductId, delta: i64) -> StoreResult<()> {
        let product = self
            .work
            .products
            .get_mut(&product_id)
            .ok_or_else(|| StoreError::RowNotFound(format!("product {product_id}")))?;
        let adjusted = i64::from(product.stock) + delta;
        if adjusted < 0 {
            return Err(StoreError::StockConflict { product_id });
        }
        product.stock = adjusted as u32;
        Ok(())
    }

    async fn insert_order(&mut self, order: &Order) -> StoreResult<()> {
        if self.work.orders.contains_key(&order.id()) {
            return Err(StoreError::UniqueViolation(format!(
                "order {} already exists",
                order.id()
            )));
        }
        self.work.orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn order_by_id_and_user(
        &mut self,
        user_id: UserId,
        order_id: OrderId,
    ) -> StoreResult<Option<Order>> {
        Ok(self
            .work
            .orders
            .get(&order_id)
            .filter(|order| order.user_id() == user_id)
            .cloned())
    }

    async fn orders_by_user(
        &mut self,
        user_id: UserId,
        pagination: Pagination,
    ) -> StoreResult<(Vec<Order>, u64)> {
        let mut orders: Vec<Order> = self
            .work
            .orders
            .values()
            .filter(|order| order.user_id() == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        let total = orders.len() as u64;
        let page = orders
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.limit())
            .collect();
        Ok((page, total))
    }

    async fn set_order_status(
        &mut self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> StoreResult<()> {
        let order = self
            .work
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| StoreError::RowNotFound(format!("order {order_id}")))?;
        if !order.transition_to(status) {
            return Err(StoreError::Conflict(format!(
                "order {order_id} cannot move from {} to {status}",
                order.status()
            )));
        }
        Ok(())
    }

    async fn commit(self) -> StoreResult<()> {
        let InMemoryTx { mut guard, work } = self;
        *guard = work;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Money;

    #[tokio::test]
    async fn uncommitted_writes_are_invisible() {
        let store = InMemoryStore::new();
        let product = Product::new("Widget", Money::from_cents(1000), 5);
        let product_id = product.id;

        {
            let mut tx = store.begin().await.unwrap();
            tx.insert_product(&product).await.unwrap();
            // dropped without commit
        }

        let mut tx = store.begin().await.unwrap();
        assert!(tx.product(product_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn committed_writes_are_visible() {
        let store = InMemoryStore::new();
        let product = Product::new("Widget", Money::from_cents(1000), 5);
        let product_id = product.id;

        let mut tx = store.begin().await.unwrap();
        tx.insert_product(&product).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(store.stock_of(product_id).await, Some(5));
    }

    #[tokio::test]
    async fn adjust_stock_rejects_negative_result() {
        let store = InMemoryStore::new();
        let product = Product::new("Widget", Money::from_cents(1000), 2);
        let product_id = product.id;
        store.seed_product(product).await;

        let mut tx = store.begin().await.unwrap();
        let err = tx.adjust_stock(product_id, -3).await.unwrap_err();
        assert!(matches!(err, StoreError::StockConflict { .. }));
        // untouched after the rejected adjustment
        assert_eq!(tx.product(product_id).await.unwrap().unwrap().stock, 2);
    }

    #[tokio::test]
    async fn second_open_cart_for_user_is_rejected() {
        let store = InMemoryStore::new();
        let user_id = UserId::new();

        let mut tx = store.begin().await.unwrap();
        tx.insert_cart(&Cart::new(user_id)).await.unwrap();
        let err = tx.insert_cart(&Cart::new(user_id)).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn cart_lookup_is_owner_scoped() {
        let store = InMemoryStore::new();
        let owner = UserId::new();
        let cart = Cart::new(owner);
        let cart_id = cart.id();

        let mut tx = store.begin().await.unwrap();
        tx.insert_cart(&cart).await.unwrap();

        assert!(
            tx.cart_by_id_and_user(owner, cart_id)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            tx.cart_by_id_and_user(UserId::new(), cart_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn set_order_status_enforces_legal_transitions() {
        use chrono::Utc;

        let store = InMemoryStore::new();
        let mut cart = Cart::new(UserId::new());
        cart.put_item(ProductId::new(), 1, Money::from_cents(100));
        let order = Order::from_cart(&cart, Utc::now());
        let order_id = order.id();

        let mut tx = store.begin().await.unwrap();
        tx.insert_order(&order).await.unwrap();
        tx.set_order_status(order_id, OrderStatus::Canceled)
            .await
            .unwrap();

        let err = tx
            .set_order_status(order_id, OrderStatus::Canceled)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }
}
