mod admin;
mod error;
mod session;

use axum::{Router, middleware};
use std::sync::Arc;

use crate::auth::{AuthGate, Authenticator, ResponseMode, admin_only, require_auth};
use crate::db::Database;
use crate::jwt::JwtConfig;

pub use error::{ApiError, ResultExt};

/// Session settings for the API.
pub struct SessionConfig {
    pub jwt: Arc<JwtConfig>,
    pub secure_cookies: bool,
    pub token_ttl: u64,
}

/// Create the API router. Login and logout are public; every other route
/// requires authentication and reports failures as JSON. `/admin`
/// additionally requires the admin role.
pub fn create_api_router(
    db: Database,
    authenticator: Authenticator,
    session: SessionConfig,
) -> Router {
    let session_state = session::SessionState {
        db: db.clone(),
        jwt: session.jwt,
        cookie_name: authenticator.cookie_name().into(),
        secure_cookies: session.secure_cookies,
        token_ttl: session.token_ttl,
    };

    let admin_state = admin::AdminState { db };

    let protected = session::router()
        .nest(
            "/admin",
            admin::router(admin_state).layer(middleware::from_fn(admin_only)),
        )
        .layer(middleware::from_fn_with_state(
            AuthGate::new(authenticator, ResponseMode::Json),
            require_auth,
        ));

    session::public_router(session_state).merge(protected)
}
