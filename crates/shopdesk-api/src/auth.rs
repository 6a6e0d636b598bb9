//! Caller identity
//!
//! Sign-in is handled by the hosted auth service in front of this API. Requests
//! arrive with the authenticated user's id in the `x-user-id` header.

use crate::constants::USER_ID_HEADER;
use crate::error::HttpAppError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shopdesk_core::AppError;
use uuid::Uuid;

/// Authenticated caller, extracted from request headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: Uuid,
}

// Extracted from parts so it can run before the `Multipart` body extractor
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        let user_id = value
            .to_str()
            .ok()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .ok_or_else(|| AppError::Unauthorized("Invalid user id".to_string()))?;

        Ok(UserContext { user_id })
    }
}
