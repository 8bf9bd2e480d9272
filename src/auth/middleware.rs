//! Middleware that guards route groups.
//!
//! ```ignore
//! let pages = pages::router().layer(middleware::from_fn_with_state(
//!     AuthGate::new(authenticator, ResponseMode::redirect("/admin/login/secret")),
//!     require_auth,
//! ));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::errors::{AuthError, AuthRejection, ResponseMode};
use super::state::Authenticator;
use super::types::AuthContext;

/// State for [`require_auth`]: who checks the token, and how failures are reported.
#[derive(Clone)]
pub struct AuthGate {
    pub authenticator: Authenticator,
    pub mode: ResponseMode,
}

impl AuthGate {
    pub fn new(authenticator: Authenticator, mode: ResponseMode) -> Self {
        Self {
            authenticator,
            mode,
        }
    }
}

/// Authenticate the request and attach its [`AuthContext`], or reject it.
pub async fn require_auth(
    State(gate): State<AuthGate>,
    req: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let (mut parts, body) = req.into_parts();

    let ctx = gate
        .authenticator
        .authenticate(&parts.headers)
        .await
        .map_err(|error| {
            tracing::debug!(path = %parts.uri.path(), error = %error, "Request rejected");
            AuthRejection::new(error, gate.mode.clone())
        })?;

    parts.extensions.insert(ctx);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Let only admins through. Must run after [`require_auth`].
pub async fn admin_only(req: Request, next: Next) -> Result<Response, AuthRejection> {
    let allowed = match req.extensions().get::<AuthContext>() {
        Some(ctx) if ctx.role.is_admin() => true,
        Some(ctx) => {
            tracing::warn!(account_id = %ctx.id, path = %req.uri().path(), "Admin route denied");
            false
        }
        None => false,
    };

    if !allowed {
        return Err(AuthRejection::json(AuthError::InsufficientPrivilege));
    }

    Ok(next.run(req).await)
}
