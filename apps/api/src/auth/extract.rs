//! Request extractors for authenticated routes.
//!
//! Handlers declare `AuthUser` (any signed-in user) or `AdminUser`
//! (admin-gated routes) as a parameter; token parsing and role checks run
//! before the handler body does.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use folio_core::UserRole;

use crate::auth::jwt::extract_bearer_token;
use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the token's subject.
    pub user_id: String,

    /// Role the token was issued for.
    pub role: UserRole,
}

impl AuthUser {
    /// Checks whether this caller may use admin-gated routes.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::AuthFailed("Missing Authorization header".to_string()))?;

        let token = extract_bearer_token(header)
            .ok_or_else(|| ApiError::AuthFailed("Expected a Bearer token".to_string()))?;

        let claims = state.jwt.validate_access_token(token)?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// An authenticated admin. Rejects non-admin tokens with 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(ApiError::Forbidden(
                "Admin privileges required".to_string(),
            ));
        }

        Ok(AdminUser(user))
    }
}
