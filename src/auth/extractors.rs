//! Axum extractors for authentication.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::errors::{AuthError, AuthRejection};
use super::types::AuthContext;

/// Hands the [`AuthContext`] attached by `require_auth` to a handler.
/// Answers 401 JSON if the route was mounted without authentication.
pub struct CurrentUser(pub AuthContext);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AuthRejection::json(AuthError::NoCredential))
    }
}
