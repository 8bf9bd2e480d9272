//! Password hashing for login.
//!
//! bcrypt is CPU-bound, so both operations run on the blocking pool.

/// Work factor for new hashes.
const HASH_COST: u32 = 10;

#[derive(Debug)]
pub enum PasswordError {
    Hash(bcrypt::BcryptError),
    Task(tokio::task::JoinError),
}

impl std::fmt::Display for PasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordError::Hash(e) => write!(f, "Failed to hash password: {}", e),
            PasswordError::Task(e) => write!(f, "Password hashing task failed: {}", e),
        }
    }
}

impl std::error::Error for PasswordError {}

pub async fn hash_password(password: &str) -> Result<String, PasswordError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, HASH_COST))
        .await
        .map_err(PasswordError::Task)?
        .map_err(PasswordError::Hash)
}

/// Check a password against a stored hash.
/// A hash that cannot be parsed (such as a locked account's) matches nothing.
pub async fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_owned();
    let hash = hash.to_owned();

    match tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await {
        Ok(Ok(matches)) => matches,
        Ok(Err(e)) => {
            tracing::debug!(error = %e, "Stored password hash is not usable");
            false
        }
        Err(e) => {
            tracing::error!(error = %e, "Password check task failed");
            false
        }
    }
}
