//! Core domain for the storefront backend.
//!
//! This crate provides:
//! - the `Product`, `Cart`, and `Order` entities with their status state
//!   machines
//! - the transactional repository boundary (`Store` / `StoreTx`) that the
//!   services run against
//! - `CartService` for cart maintenance and `CheckoutService` for the
//!   cart-to-order conversion and bounded-window cancellation
//!
//! All persistence is behind the `Store` traits; the services are
//! storage-agnostic and every multi-step mutation happens inside a single
//! transaction.

pub mod cart;
pub mod error;
pub mod order;
pub mod policy;
pub mod product;
pub mod store;

pub use cart::{Cart, CartItem, CartService, CartStatus};
pub use error::{DomainError, DomainResult};
pub use order::{CheckoutService, Order, OrderItem, OrderStatus};
pub use policy::CheckoutPolicy;
pub use product::Product;
pub use store::{Store, StoreError, StoreResult, StoreTx};
