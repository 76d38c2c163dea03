//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The state of an order.
///
/// An order is born `Completed` (it only exists because a checkout
/// succeeded) and may move to `Canceled` exactly once, within the
/// cancellation window. `Canceled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Checkout succeeded; stock has been decremented.
    Completed,

    /// The order was reversed; stock has been restored (terminal).
    Canceled,
}

impl OrderStatus {
    /// Returns true if cancellation is still possible from this status.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Canceled)
    }

    /// Returns true if `self → to` is a legal transition.
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        matches!((self, to), (OrderStatus::Completed, OrderStatus::Canceled))
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
