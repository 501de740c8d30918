//! Catalog handlers for authors.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use folio_core::pagination::PageResult;
use folio_core::validation::{validate_name, validate_uuid};
use folio_core::Author;

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::handlers::PageQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AuthorRequest {
    pub name: String,
    pub biography: Option<String>,
}

/// GET /api/authors
pub async fn list_authors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResult<Author>>, ApiError> {
    let page = query.resolve()?;
    Ok(Json(state.db.authors().list(page).await?))
}

/// GET /api/authors/{id}
pub async fn get_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Author>, ApiError> {
    validate_uuid(&id)?;

    let author = state
        .db
        .authors()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Author not found: {id}")))?;

    Ok(Json(author))
}

/// POST /api/authors (admin)
pub async fn create_author(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<AuthorRequest>,
) -> Result<(StatusCode, Json<Author>), ApiError> {
    validate_name("name", &request.name)?;

    let now = Utc::now();
    let author = Author {
        id: Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        biography: request.biography,
        created_at: now,
        updated_at: now,
    };

    state.db.authors().insert(&author).await?;

    info!(author_id = %author.id, admin = %admin.0.user_id, "Author created");
    Ok((StatusCode::CREATED, Json(author)))
}

/// PUT /api/authors/{id} (admin)
pub async fn update_author(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<AuthorRequest>,
) -> Result<Json<Author>, ApiError> {
    validate_uuid(&id)?;
    validate_name("name", &request.name)?;

    let mut author = state
        .db
        .authors()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Author not found: {id}")))?;

    author.name = request.name.trim().to_string();
    author.biography = request.biography;
    author.updated_at = Utc::now();

    state.db.authors().update(&author).await?;

    info!(author_id = %author.id, admin = %admin.0.user_id, "Author updated");
    Ok(Json(author))
}

/// DELETE /api/authors/{id} (admin)
///
/// Hard delete; rejected with 409 while any book still references the
/// author.
pub async fn delete_author(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    validate_uuid(&id)?;

    state.db.authors().delete(&id).await?;

    info!(author_id = %id, admin = %admin.0.user_id, "Author deleted");
    Ok(StatusCode::NO_CONTENT)
}
