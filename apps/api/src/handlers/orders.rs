//! Order handlers: placement from the cart, listing, status progression.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use folio_core::pagination::PageResult;
use folio_core::validation::{validate_name, validate_uuid};
use folio_core::{CoreError, Order, OrderItem, OrderStatus, Price, StatusOption};

use crate::auth::{AdminUser, AuthUser};
use crate::error::ApiError;
use crate::handlers::PageQuery;
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub shipping_address: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// An order with its line items.
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/orders
///
/// Places an order from the caller's cart: snapshots current titles and
/// final prices into line items, writes the order in one transaction, then
/// clears the cart.
pub async fn place_order(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<OrderDetail>), ApiError> {
    validate_name("shipping_address", &request.shipping_address)?;
    validate_name("phone", &request.phone)?;

    let entries = state.cart.items(&user.user_id).await?;
    if entries.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let now = Utc::now();
    let order_id = Uuid::new_v4().to_string();

    let mut items = Vec::with_capacity(entries.len());
    let mut total = Price::zero();

    for (book_id, quantity) in entries {
        let book = state
            .db
            .books()
            .get_active_by_id(&book_id)
            .await?
            .ok_or(CoreError::BookNotFound(book_id.clone()))?;

        // Snapshot the effective price at order time
        let unit_price = book.final_price();
        let line_total = unit_price.multiply_quantity(quantity);
        total += line_total;

        items.push(OrderItem {
            id: Uuid::new_v4().to_string(),
            order_id: order_id.clone(),
            book_id,
            title_snapshot: book.title,
            unit_price_millis: unit_price.millis(),
            quantity,
            line_total_millis: line_total.millis(),
            created_at: now,
        });
    }

    let order = Order {
        id: order_id,
        user_id: user.user_id.clone(),
        status: OrderStatus::Pending,
        total_millis: total.millis(),
        shipping_address: request.shipping_address.trim().to_string(),
        phone: request.phone.trim().to_string(),
        created_at: now,
        updated_at: now,
    };

    state.db.orders().create(&order, &items).await?;
    state.cart.clear(&user.user_id).await?;

    info!(
        order_id = %order.id,
        user_id = %user.user_id,
        total = %order.total(),
        items = items.len(),
        "Order placed"
    );

    Ok((StatusCode::CREATED, Json(OrderDetail { order, items })))
}

/// GET /api/orders
///
/// Customers see their own orders; admins see everything.
pub async fn list_orders(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResult<Order>>, ApiError> {
    let page = query.resolve()?;

    let result = if user.is_admin() {
        state.db.orders().list_all(page).await?
    } else {
        state.db.orders().list_by_user(&user.user_id, page).await?
    };

    Ok(Json(result))
}

/// GET /api/orders/{id}
pub async fn get_order(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderDetail>, ApiError> {
    let order = fetch_order_for(&state, &user, &id).await?;
    let items = state.db.orders().items_for(&order.id).await?;

    Ok(Json(OrderDetail { order, items }))
}

/// GET /api/orders/{id}/next-statuses
///
/// The forward transitions a UI should offer from the order's current
/// status, as label/value pairs. Advisory: the status update below does not
/// consult this set.
pub async fn next_statuses(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<StatusOption>>, ApiError> {
    let order = fetch_order_for(&state, &user, &id).await?;

    Ok(Json(order.status.next_statuses()))
}

/// PUT /api/orders/{id}/status (admin)
///
/// Persists the submitted status. A submission outside the advisory
/// forward set is logged, not rejected.
pub async fn update_status(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    validate_uuid(&id)?;

    let order = state
        .db
        .orders()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order not found: {id}")))?;

    let advised = order
        .status
        .next_statuses()
        .iter()
        .any(|option| option.value == request.status);
    if !advised {
        warn!(
            order_id = %id,
            from = ?order.status,
            to = ?request.status,
            "Status update outside the advisory forward set"
        );
    }

    state.db.orders().update_status(&id, request.status).await?;

    info!(
        order_id = %id,
        status = ?request.status,
        admin = %admin.0.user_id,
        "Order status updated"
    );

    let updated = state
        .db
        .orders()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order not found: {id}")))?;

    Ok(Json(updated))
}

/// Fetches an order the caller is allowed to see.
///
/// Non-admins get 404 for other users' orders, not 403, so order IDs
/// cannot be probed for existence.
async fn fetch_order_for(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> Result<Order, ApiError> {
    validate_uuid(id)?;

    let order = state
        .db
        .orders()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order not found: {id}")))?;

    if !user.is_admin() && order.user_id != user.user_id {
        return Err(ApiError::NotFound(format!("Order not found: {id}")));
    }

    Ok(order)
}
