//! Cart maintenance service.

use common::{CartItemId, Principal, ProductId};

use crate::error::{DomainError, DomainResult};
use crate::store::{Store, StoreError, StoreTx};

use super::{Cart, CartItem};

/// Service for maintaining a user's open cart.
///
/// Every mutation that could oversell checks stock sufficiency against the
/// live product before persisting, so an open cart never holds more of a
/// product than the store could deliver at the time of the edit. (Checkout
/// re-validates; stock may move between edit and checkout.)
pub struct CartService<S: Store> {
    store: S,
}

impl<S: Store> CartService<S> {
    /// Creates a new cart service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the caller's open cart, creating an empty one if none
    /// exists.
    ///
    /// Safe under concurrent first access: the store's uniqueness
    /// constraint on (user, `Created`) decides insert races, and the
    /// loser fetches the winner's cart.
    #[tracing::instrument(skip(self))]
    pub async fn get_or_create_cart(&self, principal: Principal) -> DomainResult<Cart> {
        let user_id = principal.user_id;
        let mut tx = self.store.begin().await?;

        if let Some(cart) = tx.cart_for_user(user_id).await? {
            return Ok(cart);
        }

        let cart = Cart::new(user_id);
        match tx.insert_cart(&cart).await {
            Ok(()) => {
                tx.commit().await?;
                tracing::debug!(cart_id = %cart.id(), %user_id, "created cart");
                Ok(cart)
            }
            Err(StoreError::UniqueViolation(_)) => {
                // Lost the insert race; the winner's cart is this user's cart.
                drop(tx);
                let mut retry = self.store.begin().await?;
                retry
                    .cart_for_user(user_id)
                    .await?
                    .ok_or(DomainError::CartNotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Adds `quantity` units of a product to the caller's open cart,
    /// merging with an existing line for the same product.
    ///
    /// The line's price snapshot is taken from the product's current
    /// price. Fails with `InsufficientStock` if the cart would end up
    /// holding more units than are in stock.
    #[tracing::instrument(skip(self))]
    pub async fn add_item(
        &self,
        principal: Principal,
        product_id: ProductId,
        quantity: u32,
    ) -> DomainResult<Cart> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity);
        }

        let user_id = principal.user_id;
        let mut tx = self.store.begin().await?;

        let mut cart = match tx.cart_for_user(user_id).await? {
            Some(cart) => cart,
            None => {
                let cart = Cart::new(user_id);
                tx.insert_cart(&cart).await?;
                cart
            }
        };

        let product = tx
            .product(product_id)
            .await?
            .ok_or(DomainError::ProductNotFound { product_id })?;

        let requested = cart.quantity_of(product_id) + quantity;
        if !product.has_stock(requested) {
            return Err(DomainError::InsufficientStock {
                product_id,
                requested,
                available: product.stock,
            });
        }

        cart.put_item(product_id, quantity, product.price);
        tx.update_cart(&cart).await?;
        tx.commit().await?;
        Ok(cart)
    }

    /// Replaces a cart line's quantity, refreshing its price snapshot.
    #[tracing::instrument(skip(self))]
    pub async fn update_item_quantity(
        &self,
        principal: Principal,
        item_id: CartItemId,
        quantity: u32,
    ) -> DomainResult<Cart> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity);
        }

        let user_id = principal.user_id;
        let mut tx = self.store.begin().await?;

        let mut cart = tx
            .cart_for_user(user_id)
            .await?
            .ok_or(DomainError::CartNotFound)?;
        let product_id = cart
            .find_item(item_id)
            .ok_or(DomainError::CartItemNotFound)?
            .product_id;

        let product = tx
            .product(product_id)
            .await?
            .ok_or(DomainError::ProductNotFound { product_id })?;

        if !product.has_stock(quantity) {
            return Err(DomainError::InsufficientStock {
                product_id,
                requested: quantity,
                available: product.stock,
            });
        }

        cart.set_item_quantity(item_id, quantity, product.price);
        tx.update_cart(&cart).await?;
        tx.commit().await?;
        Ok(cart)
    }

    /// Removes a line from the caller's open cart.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(&self, principal: Principal, item_id: CartItemId) -> DomainResult<Cart> {
        let user_id = principal.user_id;
        let mut tx = self.store.begin().await?;

        let mut cart = tx
            .cart_for_user(user_id)
            .await?
            .ok_or(DomainError::CartNotFound)?;
        if !cart.remove_item(item_id) {
            return Err(DomainError::CartItemNotFound);
        }

        tx.update_cart(&cart).await?;
        tx.commit().await?;
        Ok(cart)
    }

    /// Returns one line of the caller's open cart by id.
    #[tracing::instrument(skip(self))]
    pub async fn find_item(
        &self,
        principal: Principal,
        item_id: CartItemId,
    ) -> DomainResult<CartItem> {
        let mut tx = self.store.begin().await?;
        let cart = tx
            .cart_for_user(principal.user_id)
            .await?
            .ok_or(DomainError::CartNotFound)?;
        cart.find_item(item_id)
            .cloned()
            .ok_or(DomainError::CartItemNotFound)
    }
}
