//! Credential extraction from the `Authorization` header and cookies.

use axum::http::{HeaderMap, header};

/// Default name of the cookie carrying the session token.
pub const DEFAULT_COOKIE_NAME: &str = "authToken";

/// Extract a cookie value from the Cookie header.
pub fn get_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    for part in cookie_header.split(';') {
        let part = part.trim();
        if let Some((key, value)) = part.split_once('=') {
            if key.trim() == name {
                return Some(value.trim());
            }
        }
    }
    None
}

/// Extract the token of an `Authorization: Bearer <token>` header.
pub fn get_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .split_whitespace()
        .next()
}

/// Find the credential presented by the client.
/// The bearer header wins over the cookie; empty values count as absent.
pub fn extract_credential<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    get_bearer_token(headers)
        .or_else(|| get_cookie(headers, cookie_name).filter(|value| !value.is_empty()))
}

/// `Set-Cookie` value that stores a session token for `max_age` seconds.
pub fn session_cookie(name: &str, token: &str, max_age: u64, secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}{}",
        name, token, max_age, secure
    )
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_cookie(name: &str, secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!("{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0{}", name, secure)
}
