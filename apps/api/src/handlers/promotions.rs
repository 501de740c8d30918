//! Promotion handlers. All admin-gated except the listing.
//!
//! A promotion is a named group of books sharing a discount percentage.
//! The discount percentage bound is validated on every path that sets one:
//! create, update, and book attachment all go through the same check.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use folio_core::pagination::PageResult;
use folio_core::validation::{validate_discount_percentage, validate_name, validate_uuid};
use folio_core::Promotion;

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::handlers::PageQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PromotionRequest {
    pub name: String,
    pub discount_percentage: i32,
}

/// GET /api/promotions
pub async fn list_promotions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResult<Promotion>>, ApiError> {
    let page = query.resolve()?;
    Ok(Json(state.db.promotions().list(page).await?))
}

/// GET /api/promotions/{id}
pub async fn get_promotion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Promotion>, ApiError> {
    validate_uuid(&id)?;

    let promotion = state
        .db
        .promotions()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Promotion not found: {id}")))?;

    Ok(Json(promotion))
}

/// POST /api/promotions (admin)
pub async fn create_promotion(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<PromotionRequest>,
) -> Result<(StatusCode, Json<Promotion>), ApiError> {
    validate_name("name", &request.name)?;
    validate_discount_percentage(request.discount_percentage)?;

    let now = Utc::now();
    let promotion = Promotion {
        id: Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        discount_percentage: request.discount_percentage,
        created_at: now,
        updated_at: now,
    };

    state.db.promotions().insert(&promotion).await?;

    info!(promotion_id = %promotion.id, admin = %admin.0.user_id, "Promotion created");
    Ok((StatusCode::CREATED, Json(promotion)))
}

/// PUT /api/promotions/{id} (admin)
///
/// Changing the percentage reprices every attached book in one transaction.
pub async fn update_promotion(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<PromotionRequest>,
) -> Result<Json<Promotion>, ApiError> {
    validate_uuid(&id)?;
    validate_name("name", &request.name)?;
    validate_discount_percentage(request.discount_percentage)?;

    let mut promotion = state
        .db
        .promotions()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Promotion not found: {id}")))?;

    promotion.name = request.name.trim().to_string();
    promotion.discount_percentage = request.discount_percentage;
    promotion.updated_at = Utc::now();

    state.db.promotions().update(&promotion).await?;

    info!(promotion_id = %promotion.id, admin = %admin.0.user_id, "Promotion updated");
    Ok(Json(promotion))
}

/// DELETE /api/promotions/{id} (admin)
///
/// Detaches every book (restoring list prices) and removes the promotion,
/// all in one transaction.
pub async fn delete_promotion(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    validate_uuid(&id)?;

    state.db.promotions().delete(&id).await?;

    info!(promotion_id = %id, admin = %admin.0.user_id, "Promotion deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/promotions/{id}/books/{book_id} (admin)
///
/// Applies the promotion's discount to the book and stamps the discount
/// timestamp.
pub async fn attach_book(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path((id, book_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    validate_uuid(&id)?;
    validate_uuid(&book_id)?;

    state.db.promotions().attach_book(&id, &book_id).await?;

    info!(
        promotion_id = %id,
        book_id = %book_id,
        admin = %admin.0.user_id,
        "Book attached to promotion"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/promotions/{id}/books/{book_id} (admin)
///
/// Resets the book's final price to its list price and clears the discount
/// fields.
pub async fn detach_book(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path((id, book_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    validate_uuid(&id)?;
    validate_uuid(&book_id)?;

    state.db.promotions().detach_book(&id, &book_id).await?;

    info!(
        promotion_id = %id,
        book_id = %book_id,
        admin = %admin.0.user_id,
        "Book detached from promotion"
    );
    Ok(StatusCode::NO_CONTENT)
}
