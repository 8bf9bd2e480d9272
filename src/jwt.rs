//! JWT token generation and validation.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Decoded claims of an admin session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub id: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Default session duration: 1 day
pub const DEFAULT_TOKEN_DURATION_SECS: u64 = 24 * 60 * 60;

/// Signing and verification keys derived from the shared secret.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

/// Result of generating a token.
#[derive(Debug, Clone)]
pub struct TokenResult {
    /// The JWT token string
    pub token: String,
    /// Expiration timestamp (Unix seconds)
    pub expires_at: u64,
    /// Token duration in seconds
    pub duration: u64,
}

impl JwtConfig {
    /// Create a new JWT configuration with the given secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Sign a token for the given account, valid for `duration` seconds.
    pub fn generate_token(&self, account_id: &str, duration: u64) -> Result<TokenResult, JwtError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| JwtError::TimeError)?
            .as_secs();

        let exp = now.checked_add(duration).ok_or(JwtError::InvalidDuration)?;

        let claims = Claims {
            id: account_id.to_string(),
            iat: now,
            exp,
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(JwtError::Encoding)?;

        Ok(TokenResult {
            token,
            expires_at: exp,
            duration,
        })
    }

    /// Validate signature and expiry, then decode the claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(JwtError::Decoding)?;

        if token_data.claims.id.trim().is_empty() {
            return Err(JwtError::MissingSubject);
        }

        Ok(token_data.claims)
    }
}

/// Errors that can occur during JWT operations.
#[derive(Debug)]
pub enum JwtError {
    /// Error encoding the token
    Encoding(jsonwebtoken::errors::Error),
    /// Error decoding the token (bad signature, malformed, expired)
    Decoding(jsonwebtoken::errors::Error),
    /// System time error
    TimeError,
    /// Expiry does not fit in a Unix timestamp
    InvalidDuration,
    /// Token verified but carries no subject id
    MissingSubject,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::Encoding(e) => write!(f, "Failed to encode token: {}", e),
            JwtError::Decoding(e) => write!(f, "Failed to decode token: {}", e),
            JwtError::TimeError => write!(f, "System time error"),
            JwtError::InvalidDuration => write!(f, "Token duration is out of range"),
            JwtError::MissingSubject => write!(f, "Token has no subject"),
        }
    }
}

impl std::error::Error for JwtError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_validate_token() {
        let config = JwtConfig::new(b"test-secret-key-for-testing");

        let result = config.generate_token("uuid-123", 60).unwrap();
        assert_eq!(result.duration, 60);

        let claims = config.validate_token(&result.token).unwrap();
        assert_eq!(claims.id, "uuid-123");
        assert_eq!(claims.exp, result.expires_at);
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn test_oversized_duration_is_rejected() {
        let config = JwtConfig::new(b"test-secret-key-for-testing");

        let result = config.generate_token("uuid-123", u64::MAX);
        assert!(matches!(result, Err(JwtError::InvalidDuration)));
    }

    #[test]
    fn test_invalid_token() {
        let config = JwtConfig::new(b"test-secret-key-for-testing");

        let result = config.validate_token("invalid-token");
        assert!(matches!(result, Err(JwtError::Decoding(_))));
    }

    #[test]
    fn test_wrong_secret() {
        let config1 = JwtConfig::new(b"secret-1");
        let config2 = JwtConfig::new(b"secret-2");

        let result = config1.generate_token("uuid-123", 60).unwrap();

        assert!(config2.validate_token(&result.token).is_err());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        use base64::Engine;
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let config = JwtConfig::new(b"test-secret-key-for-testing");
        let result = config.generate_token("uuid-123", 60).unwrap();

        let mut parts: Vec<String> = result.token.split('.').map(str::to_string).collect();
        let payload = engine.decode(&parts[1]).unwrap();
        let mut claims: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        claims["id"] = serde_json::Value::String("uuid-456".to_string());
        parts[1] = engine.encode(serde_json::to_vec(&claims).unwrap());

        assert!(config.validate_token(&parts.join(".")).is_err());
    }

    #[test]
    fn test_expired_token() {
        let secret = b"test-secret";
        let encoding_key = EncodingKey::from_secret(secret);

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let claims = Claims {
            id: "uuid-123".to_string(),
            iat: now - 100,
            exp: now - 50,
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &encoding_key).unwrap();

        let config = JwtConfig::new(secret);
        assert!(config.validate_token(&token).is_err());
    }

    #[test]
    fn test_empty_subject_rejected() {
        let config = JwtConfig::new(b"test-secret-key-for-testing");

        let result = config.generate_token("", 60).unwrap();
        assert!(matches!(
            config.validate_token(&result.token),
            Err(JwtError::MissingSubject)
        ));
    }
}
