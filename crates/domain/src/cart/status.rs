//! Cart status state machine.

use serde::{Deserialize, Serialize};

/// The state of a cart in its lifecycle.
///
/// The only transition the system performs is `Created → Paid`, and only
/// as the final step of a successful checkout. `Cancelled` exists for
/// parity with stored data; no core operation produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CartStatus {
    /// The user's open cart; items can be added and removed.
    #[default]
    Created,

    /// The cart was converted into an order (terminal).
    Paid,

    /// The cart was abandoned (terminal).
    Cancelled,
}

impl CartStatus {
    /// Returns true if items can still be modified.
    pub fn can_modify_items(&self) -> bool {
        matches!(self, CartStatus::Created)
    }

    /// Returns true if the cart can be converted into an order.
    pub fn can_checkout(&self) -> bool {
        matches!(self, CartStatus::Created)
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CartStatus::Paid | CartStatus::Cancelled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CartStatus::Created => "created",
            CartStatus::Paid => "paid",
            CartStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for CartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_created() {
        assert_eq!(CartStatus::default(), CartStatus::Created);
    }

    #[test]
    fn only_created_can_modify_items() {
        assert!(CartStatus::Created.can_modify_items());
        assert!(!CartStatus::Paid.can_modify_items());
        assert!(!CartStatus::Cancelled.can_modify_items());
    }

    #[test]
    fn only_created_can_checkout() {
        assert!(CartStatus::Created.can_checkout());
        assert!(!CartStatus::Paid.can_checkout());
        assert!(!CartStatus::Cancelled.can_checkout());
    }

    #[test]
    fn terminal_states() {
        assert!(!CartStatus::Created.is_terminal());
        assert!(CartStatus::Paid.is_terminal());
        assert!(CartStatus::Cancelled.is_terminal());
    }

    #[test]
    fn display() {
        assert_eq!(CartStatus::Created.to_string(), "created");
        assert_eq!(CartStatus::Paid.to_string(), "paid");
        assert_eq!(CartStatus::Cancelled.to_string(), "cancelled");
    }
}
