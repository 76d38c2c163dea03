//! Checkout policy configuration.

use chrono::Duration;

const DEFAULT_CANCELLATION_WINDOW_DAYS: i64 = 14;

/// Policy values governing checkout and cancellation.
///
/// The cancellation window bounds how long after creation an order may
/// still be canceled. It is configuration, not domain logic: the services
/// take the policy by value at construction.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutPolicy {
    pub cancellation_window: Duration,
}

impl CheckoutPolicy {
    /// A policy with the cancellation window given in days.
    pub fn with_window_days(days: i64) -> Self {
        Self {
            cancellation_window: Duration::days(days),
        }
    }
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self::with_window_days(DEFAULT_CANCELLATION_WINDOW_DAYS)
    }
}
