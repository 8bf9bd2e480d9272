//! Authentication error types and the failure policy that turns them into responses.

use std::sync::Arc;

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Why a request was not allowed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Neither a bearer header nor the session cookie was present
    NoCredential,
    /// Bad signature, malformed or expired token
    VerificationFailed,
    /// Token subject does not match any account
    AccountNotFound,
    /// Account exists but is deactivated
    AccountInactive,
    /// Account store failure
    Internal(String),
    /// Authenticated, but not an admin
    InsufficientPrivilege,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NoCredential | AuthError::VerificationFailed | AuthError::AccountNotFound => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::AccountInactive | AuthError::InsufficientPrivilege => StatusCode::FORBIDDEN,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::NoCredential => write!(f, "Authentication required"),
            AuthError::VerificationFailed => write!(f, "Invalid token"),
            AuthError::AccountNotFound => write!(f, "User not found"),
            AuthError::AccountInactive => write!(f, "Account is deactivated"),
            AuthError::Internal(message) => write!(f, "{}", message),
            AuthError::InsufficientPrivilege => write!(f, "Access denied. Admin only"),
        }
    }
}

impl std::error::Error for AuthError {}

/// How a route group reports authentication failures.
/// Chosen once when the routes are mounted.
#[derive(Debug, Clone)]
pub enum ResponseMode {
    /// JSON `{"message": ...}` body with a 401/403/500 status
    Json,
    /// 302 to the login page, whatever the cause
    Redirect { login_path: Arc<str> },
}

impl ResponseMode {
    pub fn redirect(login_path: &str) -> Self {
        ResponseMode::Redirect {
            login_path: Arc::from(login_path),
        }
    }
}

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// An [`AuthError`] paired with the response mode of the route it happened on.
#[derive(Debug)]
pub struct AuthRejection {
    pub error: AuthError,
    pub mode: ResponseMode,
}

impl AuthRejection {
    pub fn new(error: AuthError, mode: ResponseMode) -> Self {
        Self { error, mode }
    }

    pub fn json(error: AuthError) -> Self {
        Self::new(error, ResponseMode::Json)
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self.mode {
            // The role gate never redirects.
            ResponseMode::Redirect { login_path }
                if self.error != AuthError::InsufficientPrivilege =>
            {
                (StatusCode::FOUND, [(header::LOCATION, login_path.to_string())]).into_response()
            }
            _ => (
                self.error.status_code(),
                Json(MessageBody {
                    message: self.error.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
