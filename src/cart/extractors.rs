use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

use crate::errors::ApiError;

pub const SESSION_HEADER: &str = "x-session-id";
const MAX_SESSION_LEN: usize = 128;

/// Opaque client session id taken from the `X-Session-Id` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or((StatusCode::BAD_REQUEST, "Missing X-Session-Id header".into()))?;

        if raw.len() > MAX_SESSION_LEN {
            return Err((StatusCode::BAD_REQUEST, "X-Session-Id too long".into()));
        }

        Ok(SessionId(raw.to_owned()))
    }
}
