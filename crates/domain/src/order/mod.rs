//! Order aggregate, checkout and cancellation service.

mod aggregate;
mod service;
mod status;

pub use aggregate::{Order, OrderItem};
pub use service::CheckoutService;
pub use status::OrderStatus;
