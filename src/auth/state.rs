//! Authentication backend: account lookup seam and the authenticator built on it.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;

use super::cookie::extract_credential;
use super::errors::AuthError;
use super::types::AuthContext;
use crate::db::Account;
use crate::jwt::JwtConfig;

/// Account store failure (connection lost, query error).
#[derive(Debug, Clone)]
pub struct LookupError(String);

impl LookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for LookupError {}

/// Read-only view of the account store used by the authentication flow.
/// Implementations must not return sensitive fields such as password hashes.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, LookupError>;
}

/// Runs extractor → verifier → resolver for one request.
#[derive(Clone)]
pub struct Authenticator {
    jwt: Arc<JwtConfig>,
    accounts: Arc<dyn AccountLookup>,
    cookie_name: Arc<str>,
}

impl Authenticator {
    pub fn new(jwt: Arc<JwtConfig>, accounts: Arc<dyn AccountLookup>, cookie_name: &str) -> Self {
        Self {
            jwt,
            accounts,
            cookie_name: Arc::from(cookie_name),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<AuthContext, AuthError> {
        let token = extract_credential(headers, &self.cookie_name).ok_or(AuthError::NoCredential)?;

        let claims = self.jwt.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            AuthError::VerificationFailed
        })?;

        let account = self
            .accounts
            .find_by_id(&claims.id)
            .await
            .map_err(|e| {
                tracing::error!(account_id = %claims.id, error = %e, "Failed to look up account");
                AuthError::Internal(e.to_string())
            })?
            .ok_or_else(|| {
                tracing::warn!(account_id = %claims.id, "Token subject has no account");
                AuthError::AccountNotFound
            })?;

        if !account.active {
            tracing::warn!(account_id = %account.id, "Deactivated account presented a token");
            return Err(AuthError::AccountInactive);
        }

        Ok(AuthContext::from(account))
    }
}
