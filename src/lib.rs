pub mod api;
pub mod auth;
pub mod cli;
pub mod db;
pub mod jwt;
pub mod pages;

use api::{SessionConfig, create_api_router};
use auth::{AuthGate, Authenticator, ResponseMode, require_auth};
use axum::{Json, Router, middleware, routing::get};
use db::Database;
use jwt::JwtConfig;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Login page that unauthenticated page requests are sent to.
pub const DEFAULT_LOGIN_PATH: &str = "/admin/login/secret";

pub struct ServerConfig {
    /// Database connection (cloneable, uses connection pool internally)
    pub db: Database,
    /// JWT secret for verifying and signing tokens
    pub jwt_secret: Vec<u8>,
    /// Name of the cookie carrying the session token
    pub cookie_name: String,
    /// Redirect target for unauthenticated page requests
    pub login_path: String,
    /// Whether to set Secure flag on cookies (should be true in production with HTTPS)
    pub secure_cookies: bool,
    /// Lifetime in seconds of tokens issued at login
    pub token_ttl: u64,
}

/// Create the application router with the given configuration.
pub fn create_app(config: &ServerConfig) -> Router {
    let jwt = Arc::new(JwtConfig::new(&config.jwt_secret));

    let authenticator = Authenticator::new(
        jwt.clone(),
        Arc::new(config.db.clone()),
        &config.cookie_name,
    );

    let api_router = create_api_router(
        config.db.clone(),
        authenticator.clone(),
        SessionConfig {
            jwt,
            secure_cookies: config.secure_cookies,
            token_ttl: config.token_ttl,
        },
    );

    let page_routes = pages::router().layer(middleware::from_fn_with_state(
        AuthGate::new(authenticator, ResponseMode::redirect(&config.login_path)),
        require_auth,
    ));

    Router::new()
        .route("/health", get(health))
        .route(&config.login_path, get(pages::login_page))
        .merge(page_routes)
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Run the server on the given listener. This function blocks until the server exits.
pub async fn run_server(config: ServerConfig, listener: TcpListener) -> Result<(), std::io::Error> {
    let app = create_app(&config);
    axum::serve(listener, app.into_make_service()).await
}
