//! Bearer token validation
//!
//! Tokens are issued by the authentication service; this side only checks
//! the signature and expiry and extracts the acting user.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lonkind_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Get the user ID as a Snowflake
    ///
    /// # Errors
    /// Returns an error if the subject cannot be parsed as a Snowflake
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }
}

/// HMAC-SHA256 token service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        }
    }

    /// Sign an access token for `user_id`, as the issuing service does
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token(&self, user_id: Snowflake) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to encode JWT: {e}")))
    }

    /// Validate an access token and return the claims
    ///
    /// # Errors
    /// Returns an error if the token is malformed, badly signed, or expired
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_validate() {
        let service = JwtService::new("test-secret", 900);
        let token = service.issue_access_token(Snowflake::new(42)).unwrap();

        let claims = service.validate_access_token(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), Snowflake::new(42));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = JwtService::new("secret-a", 900)
            .issue_access_token(Snowflake::new(1))
            .unwrap();
        let err = JwtService::new("secret-b", 900)
            .validate_access_token(&token)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_expired_token() {
        // Past the default 60s leeway
        let service = JwtService::new("test-secret", -120);
        let token = service.issue_access_token(Snowflake::new(1)).unwrap();
        let err = service.validate_access_token(&token).unwrap_err();
        assert!(matches!(err, AppError::TokenExpired));
    }

    #[test]
    fn test_garbage_token() {
        let service = JwtService::new("test-secret", 900);
        assert!(matches!(
            service.validate_access_token("not.a.jwt"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = Claims {
            sub: "alice".to_string(),
            iat: 0,
            exp: 0,
        };
        assert!(claims.user_id().is_err());
    }
}
