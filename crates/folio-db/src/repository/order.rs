//! # Order Repository
//!
//! Database operations for orders and order items.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. PLACE                                                               │
//! │     └── create() → Order { status: Pending } + items, one transaction  │
//! │         (items snapshot title and effective unit price at order time)  │
//! │                                                                         │
//! │  2. PROGRESS                                                            │
//! │     └── update_status() → persists whatever status is submitted;       │
//! │         the forward set from OrderStatus::next_statuses() is advisory  │
//! │         and the caller logs submissions outside it                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::PgPool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use folio_core::pagination::{PageRequest, PageResult};
use folio_core::{Order, OrderItem, OrderStatus};

const ORDER_COLUMNS: &str =
    "id, user_id, status, total_millis, shipping_address, phone, created_at, updated_at";

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: PgPool) -> Self {
        OrderRepository { pool }
    }

    /// Creates an order with its items in one transaction.
    ///
    /// Either the order and every line land together or nothing does.
    pub async fn create(&self, order: &Order, items: &[OrderItem]) -> DbResult<()> {
        debug!(id = %order.id, user_id = %order.user_id, items = items.len(), "Creating order");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, user_id, status, total_millis,
                shipping_address, phone, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&order.id)
        .bind(&order.user_id)
        .bind(order.status)
        .bind(order.total_millis)
        .bind(&order.shipping_address)
        .bind(&order.phone)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, book_id, title_snapshot,
                    unit_price_millis, quantity, line_total_millis, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.book_id)
            .bind(&item.title_snapshot)
            .bind(item.unit_price_millis)
            .bind(item.quantity)
            .bind(item.line_total_millis)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets the items of an order.
    pub async fn items_for(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, book_id, title_snapshot, unit_price_millis, \
             quantity, line_total_millis, created_at \
             FROM order_items WHERE order_id = $1 ORDER BY created_at",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists a user's orders, optionally paginated, newest first.
    pub async fn list_by_user(
        &self,
        user_id: &str,
        page: Option<PageRequest>,
    ) -> DbResult<PageResult<Order>> {
        match page {
            Some(request) => {
                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
                        .bind(user_id)
                        .fetch_one(&self.pool)
                        .await?;

                let orders = sqlx::query_as::<_, Order>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3"
                ))
                .bind(user_id)
                .bind(request.limit())
                .bind(request.offset())
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::new(orders, total, request))
            }
            None => {
                let orders = sqlx::query_as::<_, Order>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 \
                     ORDER BY created_at DESC"
                ))
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::unpaginated(orders))
            }
        }
    }

    /// Lists all orders, optionally paginated, newest first. Admin view.
    pub async fn list_all(&self, page: Option<PageRequest>) -> DbResult<PageResult<Order>> {
        match page {
            Some(request) => {
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
                    .fetch_one(&self.pool)
                    .await?;

                let orders = sqlx::query_as::<_, Order>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders \
                     ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                ))
                .bind(request.limit())
                .bind(request.offset())
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::new(orders, total, request))
            }
            None => {
                let orders = sqlx::query_as::<_, Order>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::unpaginated(orders))
            }
        }
    }

    /// Updates an order's status.
    ///
    /// Persists whatever status is submitted. Legality against the advisory
    /// transition table is the caller's concern.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> DbResult<()> {
        let result = sqlx::query("UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        debug!(id = %id, status = ?status, "Updated order status");
        Ok(())
    }
}
