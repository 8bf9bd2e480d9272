//! Session endpoints.
//!
//! - POST `/auth/login` - Check a username and password, set the session cookie
//! - POST `/auth/logout` - Clear the session cookie
//! - GET `/auth/me` - The authenticated context

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::error::{ApiError, ResultExt};
use crate::auth::{AuthContext, CurrentUser, clear_cookie, session_cookie, verify_password};
use crate::db::Database;
use crate::jwt::JwtConfig;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Clone)]
pub struct SessionState {
    pub db: Database,
    pub jwt: Arc<JwtConfig>,
    pub cookie_name: Arc<str>,
    pub secure_cookies: bool,
    pub token_ttl: u64,
}

/// Routes that work without a session.
pub fn public_router(state: SessionState) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .with_state(state)
}

/// Routes for the signed-in account. The caller layers `require_auth` on top.
pub fn router() -> Router {
    Router::new().route("/auth/me", get(me))
}

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    token: String,
    expires_at: u64,
    user: AuthContext,
}

async fn login(
    State(state): State<SessionState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let Some((account, password_hash)) = state
        .db
        .accounts()
        .get_login(username)
        .await
        .db_err("Failed to look up account")?
    else {
        warn!(username = %username, "Login for unknown account");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    // Password first, so a wrong password never reveals the account's status.
    if !verify_password(&payload.password, &password_hash).await {
        warn!(account_id = %account.id, "Login with wrong password");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    if !account.active {
        warn!(account_id = %account.id, "Login for deactivated account");
        return Err(ApiError::forbidden("Account is deactivated"));
    }

    let issued = state
        .jwt
        .generate_token(&account.id, state.token_ttl)
        .map_err(|e| {
            error!(error = %e, "Failed to generate token");
            ApiError::internal("Failed to generate token")
        })?;

    let cookie = session_cookie(
        &state.cookie_name,
        &issued.token,
        issued.duration,
        state.secure_cookies,
    );

    info!(account_id = %account.id, "Logged in");

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user: AuthContext::from(account),
        }),
    ))
}

/// Always clears the cookie, whatever state the old token is in.
async fn logout(State(state): State<SessionState>) -> impl IntoResponse {
    info!("Session cookie cleared");
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_cookie(&state.cookie_name, state.secure_cookies))],
    )
}

async fn me(CurrentUser(ctx): CurrentUser) -> Json<AuthContext> {
    Json(ctx)
}
