//! Authentication middleware
//!
//! Requests without an `Authorization` header pass through anonymously; a
//! header that is present must carry a valid bearer token.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{constants::roles, error::AppError, services::AuthService, state::AppState};

/// Authenticated user extracted from JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }

    /// Owner of a resource, or an admin
    pub fn can_access(&self, owner_id: &Uuid) -> bool {
        self.id == *owner_id || self.is_admin()
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Optional authenticated user wrapper (never fails)
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return Ok(next.run(request).await);
    };

    let path = request.uri().path().to_string();
    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            debug!(path = %path, "Auth failed: Invalid Authorization format (expected 'Bearer <token>')");
            AppError::Unauthorized
        })?;

    let user = authenticate(token, &state.config().jwt.secret).inspect_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: Token verification failed");
    })?;

    debug!(path = %path, user_id = %user.id, role = %user.role, "User authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Turn a bearer token into the caller's identity
pub fn authenticate(token: &str, secret: &str) -> Result<AuthenticatedUser, AppError> {
    let claims = AuthService::verify_token(token, secret)?;
    let id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

    Ok(AuthenticatedUser {
        id,
        username: claims.username,
        role: claims.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_authenticate() {
        let id = Uuid::new_v4();
        let token = AuthService::issue_token(&id, "grace", roles::ADMIN, "s3cret", Duration::minutes(5)).unwrap();

        let user = authenticate(&token, "s3cret").unwrap();
        assert_eq!(user.id, id);
        assert!(user.is_admin());
        assert!(user.can_access(&Uuid::new_v4()));

        assert!(authenticate(&token, "other").is_err());
        assert!(authenticate("not-a-jwt", "s3cret").is_err());
    }

    #[test]
    fn test_ownership() {
        let user = AuthenticatedUser {
            id: Uuid::new_v4(),
            username: "linus".to_string(),
            role: roles::PLAYER.to_string(),
        };
        assert!(user.can_access(&user.id.clone()));
        assert!(!user.can_access(&Uuid::new_v4()));
        assert!(matches!(user.require_admin(), Err(AppError::Forbidden(_))));
    }
}
