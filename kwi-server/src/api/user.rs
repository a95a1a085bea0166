//! Caller identity supplied by the session layer
//!
//! Authentication happens upstream; this service only reads the opaque
//! user id the session layer forwards in `X-User-Id`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Optional user id of the caller; `None` for anonymous requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Option<i64>);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(UserId(None));
        };

        value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(|id| UserId(Some(id)))
            .ok_or_else(|| ApiError::BadRequest(format!("{} must be an integer", USER_ID_HEADER)))
    }
}
