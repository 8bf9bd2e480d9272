//! JWT authentication with role-based access control.
//!
//! A token is taken from the `Authorization: Bearer` header or the session
//! cookie, verified against the shared secret, and resolved to an active
//! account before an [`AuthContext`] is attached to the request. Admin-only
//! routes add [`admin_only`] on top.

mod cookie;
mod errors;
mod extractors;
mod middleware;
mod password;
mod state;
mod types;

pub use cookie::{
    DEFAULT_COOKIE_NAME, clear_cookie, extract_credential, get_bearer_token, get_cookie,
    session_cookie,
};
pub use errors::{AuthError, AuthRejection, MessageBody, ResponseMode};
pub use extractors::CurrentUser;
pub use middleware::{AuthGate, admin_only, require_auth};
pub use password::{PasswordError, hash_password, verify_password};
pub use state::{AccountLookup, Authenticator, LookupError};
pub use types::AuthContext;
