//! Domain error taxonomy.

use common::ProductId;
use thiserror::Error;

use crate::cart::CartStatus;
use crate::store::StoreError;

/// Errors surfaced by the domain services.
///
/// Absence and foreign ownership are deliberately indistinguishable: a
/// lookup scoped to the wrong user reports `NotFound`, never "exists but
/// not yours".
#[derive(Debug, Error)]
pub enum DomainError {
    /// No cart with that id is visible to the caller.
    #[error("cart not found")]
    CartNotFound,

    /// The cart exists but is not open for modification or checkout.
    #[error("cart is in state {status}, expected an open cart")]
    InvalidCartState { status: CartStatus },

    /// Checkout of a cart with no items is rejected.
    #[error("cart has no items")]
    EmptyCart,

    /// No cart item with that id exists in the caller's cart.
    #[error("cart item not found")]
    CartItemNotFound,

    /// The referenced product does not exist.
    #[error("product not found: {product_id}")]
    ProductNotFound { product_id: ProductId },

    /// Not enough stock to satisfy the requested quantity.
    #[error(
        "insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Quantities must be strictly positive.
    #[error("quantity must be greater than zero")]
    InvalidQuantity,

    /// No order with that id is visible to the caller.
    #[error("order not found")]
    OrderNotFound,

    /// The order is not `Completed`, or the cancellation window has passed.
    #[error("order can no longer be canceled")]
    OrderCannotBeCanceled,

    /// A storage-layer failure. Not retried by the services.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
