use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// HTTP header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the authenticated caller.
///
/// Token issuance and verification happen at the upstream gateway, which
/// forwards the resolved user id in the `x-user-id` header. This extractor
/// only asserts the header is present and well-formed.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok())
            .map(AuthUser)
            .ok_or_else(|| {
                AppError::Unauthorized(format!("Missing or malformed {} header", USER_ID_HEADER))
            })
    }
}
