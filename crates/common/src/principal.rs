//! The authenticated caller.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// Role of an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular shopper.
    #[default]
    Customer,
    /// Store administrator.
    Admin,
}

/// Typed identity of the caller of a service operation.
///
/// Token verification happens at the edge; by the time a service method
/// runs, the caller is represented by this value and nothing else. Services
/// never inspect raw token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
}

impl Principal {
    /// A customer principal for the given user.
    pub fn customer(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::Customer,
        }
    }

    /// An admin principal for the given user.
    pub fn admin(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::Admin,
        }
    }

    /// Returns true if the caller has administrative rights.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
