//! Bearer token verification
//!
//! Tokens are issued by the external identity provider with a shared HS256
//! secret; this service only verifies them.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Sign a token the way the identity provider does
    pub fn issue_token(
        user_id: &Uuid,
        username: &str,
        role: &str,
        secret: &str,
        ttl: Duration,
    ) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_round_trip() {
        let id = Uuid::new_v4();
        let token = AuthService::issue_token(&id, "ada", "player", SECRET, Duration::hours(1)).unwrap();

        let claims = tokio_test::assert_ok!(AuthService::verify_token(&token, SECRET));
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.username, "ada");
        assert_eq!(claims.role, "player");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token =
            AuthService::issue_token(&Uuid::new_v4(), "ada", "player", SECRET, Duration::hours(1)).unwrap();
        assert!(matches!(
            AuthService::verify_token(&token, "other-secret"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token =
            AuthService::issue_token(&Uuid::new_v4(), "ada", "player", SECRET, Duration::hours(-2)).unwrap();
        assert!(matches!(
            AuthService::verify_token(&token, SECRET),
            Err(AppError::TokenExpired)
        ));
    }
}
