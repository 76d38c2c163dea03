//! Caller extraction.
//!
//! Token verification is an upstream concern; by the time a request
//! reaches this service the gateway has already validated it and put the
//! caller's identity in headers. This module turns those headers into a
//! typed `Principal` so the domain never sees raw claims.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use common::{Principal, Role, UserId};

use crate::error::ApiError;

const USER_ID_HEADER: &str = "x-user-id";
const ROLE_HEADER: &str = "x-user-role";

/// The authenticated caller, extracted from gateway headers.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Principal);

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id: UserId = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized(format!("missing {USER_ID_HEADER} header")))?
            .parse()
            .map_err(|_| ApiError::Unauthorized(format!("malformed {USER_ID_HEADER} header")))?;

        let role = match parts
            .headers
            .get(ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            Some("admin") => Role::Admin,
            _ => Role::Customer,
        };

        Ok(Caller(Principal { user_id, role }))
    }
}

impl Caller {
    /// Returns the principal if it carries admin rights.
    pub fn require_admin(self) -> Result<Principal, ApiError> {
        if self.0.is_admin() {
            Ok(self.0)
        } else {
            Err(ApiError::Forbidden("admin role required".to_string()))
        }
    }
}
