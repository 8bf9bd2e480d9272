//! Authenticated request context.

use serde::Serialize;

use crate::db::{Account, Role};

/// Identity attached to a request once its token is verified and the
/// account is known to exist and be active. Lives as long as the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthContext {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<Account> for AuthContext {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            role: account.role,
        }
    }
}
