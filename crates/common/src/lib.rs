//! Shared value types for the storefront backend.
//!
//! This crate holds the types every layer agrees on:
//! - typed UUID identifiers for each entity
//! - `Money`, a fixed-point amount in cents
//! - `Principal`, the typed authenticated caller
//! - `Pagination` / `Page` for listing endpoints

pub mod ids;
pub mod money;
pub mod page;
pub mod principal;

pub use ids::{CartId, CartItemId, OrderId, OrderItemId, ProductId, UserId};
pub use money::Money;
pub use page::{Page, Pagination};
pub use principal::{Principal, Role};
