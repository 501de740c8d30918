//! Rating handlers: one rating per (user, book), upserted on repeat.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use folio_core::pagination::PageResult;
use folio_core::validation::{validate_stars, validate_uuid};
use folio_core::Rating;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::PageQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RateBookRequest {
    pub stars: i32,
    pub comment: Option<String>,
}

/// A book's ratings with the running average.
#[derive(Debug, Serialize)]
pub struct RatingsPage {
    pub average: Option<f64>,
    #[serde(flatten)]
    pub ratings: PageResult<Rating>,
}

/// PUT /api/books/{id}/rating
///
/// Creates or replaces the caller's rating of the book.
pub async fn rate_book(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    Json(request): Json<RateBookRequest>,
) -> Result<StatusCode, ApiError> {
    validate_uuid(&book_id)?;
    validate_stars(request.stars)?;

    // Only catalog books can be rated
    state
        .db
        .books()
        .get_active_by_id(&book_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Book not found: {book_id}")))?;

    let now = Utc::now();
    let rating = Rating {
        id: Uuid::new_v4().to_string(),
        book_id: book_id.clone(),
        user_id: user.user_id.clone(),
        stars: request.stars,
        comment: request.comment,
        created_at: now,
        updated_at: now,
    };

    state.db.ratings().upsert(&rating).await?;

    info!(book_id = %book_id, user_id = %user.user_id, stars = request.stars, "Book rated");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/books/{id}/ratings
///
/// Public listing of a book's ratings, newest first, with the average.
pub async fn list_ratings(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<RatingsPage>, ApiError> {
    validate_uuid(&book_id)?;

    let page = query.resolve()?;

    let ratings = state.db.ratings().list_by_book(&book_id, page).await?;
    let average = state.db.ratings().average_for_book(&book_id).await?;

    Ok(Json(RatingsPage { average, ratings }))
}
