//! Cart aggregate and cart maintenance service.

mod aggregate;
mod service;
mod status;

pub use aggregate::{Cart, CartItem};
pub use service::CartService;
pub use status::CartStatus;
