use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

/// Signed token payload: subject, privilege flag, issue/expiry times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: username.into(),
            is_admin,
            iat: now.timestamp(),
            exp,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token generation error: {0}")]
    TokenGeneration(String),

    #[error("token verification error: {0}")]
    TokenVerification(String),

    #[error("signing secret is empty")]
    InvalidSecret,
}

/// Sign claims with the shared secret (HS256).
pub fn generate_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| TokenError::TokenGeneration(e.to_string()))
}

/// Verify a token against the shared secret and return its claims.
///
/// This is the pure "verify or fail" half of authentication; deciding what
/// a failure means for the request belongs to the caller. Rejects bad
/// signatures, garbage input, and expired tokens alike.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| TokenError::TokenVerification(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn claims() -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: "maya1".to_string(),
            is_admin: true,
            iat: now,
            exp: now + 3600,
        }
    }

    #[test]
    fn round_trip_preserves_payload() {
        let token = generate_token(&claims(), SECRET).unwrap();
        let decoded = verify_token(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, "maya1");
        assert!(decoded.is_admin);
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let token = generate_token(&claims(), SECRET).unwrap();
        let err = verify_token(&token, "other-secret").unwrap_err();
        assert!(matches!(err, TokenError::TokenVerification(_)));
    }

    #[test]
    fn garbage_token_fails_verification() {
        assert!(verify_token("not-a-jwt", SECRET).is_err());
    }

    #[test]
    fn expired_token_fails_verification() {
        let now = Utc::now().timestamp();
        let expired = Claims {
            sub: "maya1".to_string(),
            is_admin: false,
            iat: now - 7200,
            exp: now - 3600, // past the default validation leeway
        };
        let token = generate_token(&expired, SECRET).unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn empty_secret_is_rejected_for_both_operations() {
        assert!(matches!(generate_token(&claims(), "").unwrap_err(), TokenError::InvalidSecret));
        assert!(matches!(verify_token("x", "").unwrap_err(), TokenError::InvalidSecret));
    }
}
