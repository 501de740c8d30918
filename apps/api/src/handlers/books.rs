//! Catalog handlers for books.
//!
//! Reads are public; mutations are admin-gated.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use folio_core::pagination::PageResult;
use folio_core::validation::{validate_price_millis, validate_title, validate_uuid};
use folio_core::{Book, Price};

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,

    /// Optional category filter.
    pub category_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub description: Option<String>,
    pub price_millis: i64,
    pub cover_image: Option<String>,
    pub author_id: String,
    pub category_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub title: String,
    pub description: Option<String>,
    pub price_millis: i64,
    pub cover_image: Option<String>,
    pub author_id: String,
    pub category_id: String,
}

/// Book detail with its rating average.
#[derive(Debug, Serialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub average_rating: Option<f64>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/books
///
/// Lists active books, optionally filtered by category and paginated.
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<PageResult<Book>>, ApiError> {
    let page = super::PageQuery {
        page: query.page,
        per_page: query.per_page,
    }
    .resolve()?;

    let result = match &query.category_id {
        Some(category_id) => {
            validate_uuid(category_id)?;
            state.db.books().list_by_category(category_id, page).await?
        }
        None => state.db.books().list(page).await?,
    };

    Ok(Json(result))
}

/// GET /api/books/{id}
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookDetail>, ApiError> {
    validate_uuid(&id)?;

    let book = state
        .db
        .books()
        .get_active_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Book not found: {id}")))?;

    let average_rating = state.db.ratings().average_for_book(&id).await?;

    Ok(Json(BookDetail {
        book,
        average_rating,
    }))
}

/// POST /api/books (admin)
pub async fn create_book(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    validate_title(&request.title)?;
    validate_price_millis(request.price_millis)?;
    validate_uuid(&request.author_id)?;
    validate_uuid(&request.category_id)?;

    let now = Utc::now();
    let book = Book {
        id: Uuid::new_v4().to_string(),
        title: request.title.trim().to_string(),
        description: request.description,
        price_millis: request.price_millis,
        // No promotion yet: effective price is the list price
        final_price_millis: request.price_millis,
        discount_percentage: 0,
        discounted_at: None,
        promotion_id: None,
        cover_image: request.cover_image,
        author_id: request.author_id,
        category_id: request.category_id,
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    state.db.books().insert(&book).await?;

    info!(book_id = %book.id, admin = %admin.0.user_id, "Book created");
    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /api/books/{id} (admin)
pub async fn update_book(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateBookRequest>,
) -> Result<Json<Book>, ApiError> {
    validate_uuid(&id)?;
    validate_title(&request.title)?;
    validate_price_millis(request.price_millis)?;
    validate_uuid(&request.author_id)?;
    validate_uuid(&request.category_id)?;

    let mut book = state
        .db
        .books()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Book not found: {id}")))?;

    book.title = request.title.trim().to_string();
    book.description = request.description;
    book.price_millis = request.price_millis;
    book.cover_image = request.cover_image;
    book.author_id = request.author_id;
    book.category_id = request.category_id;
    book.updated_at = Utc::now();

    // Keep the effective price in step with the list price: re-apply the
    // stored percentage when a promotion is attached, mirror otherwise
    book.final_price_millis = if book.is_discounted() {
        Price::from_millis(book.price_millis)
            .apply_discount(book.discount_percentage as u32)
            .millis()
    } else {
        book.price_millis
    };

    state.db.books().update(&book).await?;

    info!(book_id = %book.id, admin = %admin.0.user_id, "Book updated");
    Ok(Json(book))
}

/// DELETE /api/books/{id} (admin)
///
/// Soft delete: the book disappears from the catalog but stays referencable
/// from historical order items.
pub async fn delete_book(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    validate_uuid(&id)?;

    state.db.books().deactivate(&id).await?;

    info!(book_id = %id, admin = %admin.0.user_id, "Book deactivated");
    Ok(StatusCode::NO_CONTENT)
}
