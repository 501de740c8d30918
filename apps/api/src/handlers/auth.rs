//! Authentication handlers: register, login, refresh.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use folio_core::validation::{validate_email, validate_name, validate_password};
use folio_core::{User, UserRole};

use crate::auth::password::{hash_password, verify_password};
use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair returned by register, login, and refresh.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/auth/register
///
/// Creates a customer account and signs it in. Admin accounts are
/// provisioned out of band, never through this endpoint.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    validate_email(&request.email)?;
    validate_password(&request.password)?;
    validate_name("display_name", &request.display_name)?;

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4().to_string(),
        email: request.email.trim().to_lowercase(),
        display_name: request.display_name.trim().to_string(),
        password_hash: hash_password(&request.password)?,
        role: UserRole::Customer,
        created_at: now,
        updated_at: now,
    };

    // Duplicate email surfaces as 409 via the unique index
    state.db.users().insert(&user).await?;

    info!(user_id = %user.id, "User registered");

    let tokens = issue_tokens(&state, &user.id, user.role)?;
    Ok((StatusCode::CREATED, Json(tokens)))
}

/// POST /api/auth/login
///
/// Exchanges email + password for a token pair.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = request.email.trim().to_lowercase();

    let user = state.db.users().get_by_email(&email).await?;

    // One rejection message for both unknown email and wrong password,
    // so the endpoint cannot be used to probe which emails exist
    let user = match user {
        Some(user) if verify_password(&request.password, &user.password_hash)? => user,
        _ => {
            warn!(email = %email, "Failed login attempt");
            return Err(ApiError::AuthFailed("Invalid email or password".to_string()));
        }
    };

    info!(user_id = %user.id, "User logged in");

    let tokens = issue_tokens(&state, &user.id, user.role)?;
    Ok(Json(tokens))
}

/// POST /api/auth/refresh
///
/// Exchanges a valid refresh token for a fresh token pair.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let claims = state.jwt.validate_refresh_token(&request.refresh_token)?;

    info!(user_id = %claims.sub, "Token refreshed");

    let tokens = issue_tokens(&state, &claims.sub, claims.role)?;
    Ok(Json(tokens))
}

fn issue_tokens(
    state: &AppState,
    user_id: &str,
    role: UserRole,
) -> Result<TokenResponse, ApiError> {
    Ok(TokenResponse {
        access_token: state.jwt.generate_access_token(user_id, role)?,
        refresh_token: state.jwt.generate_refresh_token(user_id, role)?,
        token_type: "Bearer",
        expires_in: state.config.jwt_access_lifetime_secs,
    })
}
