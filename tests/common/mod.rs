#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use contentgate::{
    DEFAULT_LOGIN_PATH, ServerConfig,
    auth::hash_password,
    create_app,
    db::{Database, Role},
    jwt::JwtConfig,
};
use tower::ServiceExt;

pub const JWT_SECRET: &[u8] = b"test-jwt-secret";
pub const COOKIE_NAME: &str = "authToken";

pub fn test_config(db: Database) -> ServerConfig {
    ServerConfig {
        db,
        jwt_secret: JWT_SECRET.to_vec(),
        cookie_name: COOKIE_NAME.to_string(),
        login_path: DEFAULT_LOGIN_PATH.to_string(),
        secure_cookies: false,
        token_ttl: 300,
    }
}

/// Create a test app and return (app, db, jwt_config).
pub async fn create_test_app() -> (Router, Database, JwtConfig) {
    let db = Database::open(":memory:")
        .await
        .expect("Failed to open test database");
    let config = test_config(db.clone());
    (create_app(&config), db, JwtConfig::new(JWT_SECRET))
}

/// Insert an account and return its id.
pub async fn create_account(db: &Database, username: &str, role: Role, active: bool) -> String {
    let id = db
        .accounts()
        .create(username, &format!("{}@example.com", username), "$2b$10$hash", role)
        .await
        .expect("Failed to create account");
    if !active {
        db.accounts()
            .set_active(&id, false)
            .await
            .expect("Failed to deactivate account");
    }
    id
}

/// Insert an account that can log in with `password` and return its id.
pub async fn create_account_with_password(
    db: &Database,
    username: &str,
    password: &str,
    role: Role,
    active: bool,
) -> String {
    let hash = hash_password(password)
        .await
        .expect("Failed to hash password");
    let id = db
        .accounts()
        .create(username, &format!("{}@example.com", username), &hash, role)
        .await
        .expect("Failed to create account");
    if !active {
        db.accounts()
            .set_active(&id, false)
            .await
            .expect("Failed to deactivate account");
    }
    id
}

pub fn token_for(jwt: &JwtConfig, account_id: &str) -> String {
    jwt.generate_token(account_id, 300)
        .expect("Failed to generate token")
        .token
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_cookie(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("cookie", format!("{}={}", COOKIE_NAME, token))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_with_cookie(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("cookie", format!("{}={}", COOKIE_NAME, token))
        .body(Body::empty())
        .unwrap()
}

pub fn set_cookie(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
}
