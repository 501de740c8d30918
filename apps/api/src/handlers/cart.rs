//! Cart handlers. All routes require a signed-in user.
//!
//! Quantities live in Redis; prices do not. The cart view is priced at
//! read time from current final prices, so an attached or expired
//! promotion shows up on the next fetch without touching the stored cart.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use folio_core::validation::{validate_quantity, validate_uuid};
use folio_core::Price;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    pub book_id: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct CartItemAdded {
    pub book_id: String,
    pub quantity: i64,
}

/// A priced cart line.
#[derive(Debug, Serialize)]
pub struct CartLine {
    pub book_id: String,
    pub title: String,
    pub unit_price_millis: i64,
    pub quantity: i64,
    pub line_total_millis: i64,
}

/// The priced cart.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub item_count: usize,
    pub total_millis: i64,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/cart
///
/// Returns the cart priced from current final prices. Books that left the
/// catalog since they were added are skipped (and logged), not billed.
pub async fn get_cart(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<CartView>, ApiError> {
    let entries = state.cart.items(&user.user_id).await?;

    let mut items = Vec::with_capacity(entries.len());
    let mut total = Price::zero();

    for (book_id, quantity) in entries {
        let Some(book) = state.db.books().get_active_by_id(&book_id).await? else {
            warn!(user_id = %user.user_id, book_id = %book_id, "Cart references unavailable book");
            continue;
        };

        let line_total = book.final_price().multiply_quantity(quantity);
        total += line_total;

        items.push(CartLine {
            book_id,
            title: book.title,
            unit_price_millis: book.final_price_millis,
            quantity,
            line_total_millis: line_total.millis(),
        });
    }

    Ok(Json(CartView {
        item_count: items.len(),
        total_millis: total.millis(),
        items,
    }))
}

/// POST /api/cart/items
///
/// Adds a quantity of a book. Adding a book already in the cart merges by
/// incrementing the stored quantity.
pub async fn add_item(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddCartItemRequest>,
) -> Result<Json<CartItemAdded>, ApiError> {
    validate_uuid(&request.book_id)?;
    validate_quantity(request.quantity)?;

    // Only catalog books can enter a cart
    state
        .db
        .books()
        .get_active_by_id(&request.book_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Book not found: {}", request.book_id)))?;

    let quantity = state
        .cart
        .add_item(&user.user_id, &request.book_id, request.quantity)
        .await?;

    Ok(Json(CartItemAdded {
        book_id: request.book_id,
        quantity,
    }))
}

/// PUT /api/cart/items/{book_id}
///
/// Sets the quantity of a book already in the cart. Zero removes it.
pub async fn update_item(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    Json(request): Json<SetQuantityRequest>,
) -> Result<StatusCode, ApiError> {
    validate_uuid(&book_id)?;
    if request.quantity != 0 {
        validate_quantity(request.quantity)?;
    }

    state
        .cart
        .set_quantity(&user.user_id, &book_id, request.quantity)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/cart/items/{book_id}
pub async fn remove_item(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    validate_uuid(&book_id)?;

    state.cart.remove_item(&user.user_id, &book_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/cart
pub async fn clear_cart(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ApiError> {
    state.cart.clear(&user.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
