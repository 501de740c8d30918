//! Catalog handlers for categories.

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
use folio_core::Category;

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::handlers::PageQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

/// GET /api/categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResult<Category>>, ApiError> {
    let page = query.resolve()?;
    Ok(Json(state.db.categories().list(page).await?))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    validate_uuid(&id)?;

    let category = state
        .db
        .categories()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Category not found: {id}")))?;

    Ok(Json(category))
}

/// POST /api/categories (admin)
pub async fn create_category(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    validate_name("name", &request.name)?;

    let now = Utc::now();
    let category = Category {
        id: Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        description: request.description,
        created_at: now,
        updated_at: now,
    };

    state.db.categories().insert(&category).await?;

    info!(category_id = %category.id, admin = %admin.0.user_id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/{id} (admin)
pub async fn update_category(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<CategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    validate_uuid(&id)?;
    validate_name("name", &request.name)?;

    let mut category = state
        .db
        .categories()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Category not found: {id}")))?;

    category.name = request.name.trim().to_string();
    category.description = request.description;
    category.updated_at = Utc::now();

    state.db.categories().update(&category).await?;

    info!(category_id = %category.id, admin = %admin.0.user_id, "Category updated");
    Ok(Json(category))
}

/// DELETE /api/categories/{id} (admin)
///
/// Hard delete; rejected with 409 while any book is still filed here.
pub async fn delete_category(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    validate_uuid(&id)?;

    state.db.categories().delete(&id).await?;

    info!(category_id = %id, admin = %admin.0.user_id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
