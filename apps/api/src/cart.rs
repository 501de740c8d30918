//! # Cart Store
//!
//! Redis-backed shopping cart: one hash per user, book id → quantity.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Storage Layout                              │
//! │                                                                         │
//! │  Key: cart:{user_id}                                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┬──────────┐                           │
//! │  │ field (book id)              │ quantity │                           │
//! │  ├──────────────────────────────┼──────────┤                           │
//! │  │ 550e8400-e29b-...            │ 2        │                           │
//! │  │ 7c9e6679-7425-...            │ 1        │                           │
//! │  └──────────────────────────────┴──────────┘                           │
//! │                                                                         │
//! │  add_item       → HINCRBY (adding the same book merges quantities)     │
//! │  set_quantity   → HSET, or HDEL when the quantity is zero              │
//! │  remove_item    → HDEL                                                 │
//! │  items          → HGETALL                                              │
//! │  clear          → DEL                                                  │
//! │                                                                         │
//! │  No TTL: carts persist until ordered or cleared.                       │
//! │  Pricing happens at read time from current final prices.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::debug;

use folio_core::{CoreError, MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

use crate::error::ApiError;

/// Redis-backed cart store.
///
/// `ConnectionManager` multiplexes one connection and reconnects on failure;
/// cloning it per call is the intended usage.
#[derive(Clone)]
pub struct CartStore {
    conn: ConnectionManager,
}

impl CartStore {
    /// Connects to Redis.
    pub async fn connect(url: &str) -> Result<Self, ApiError> {
        let client = Client::open(url)
            .map_err(|e| ApiError::Unavailable(format!("Invalid Redis URL: {e}")))?;

        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| ApiError::Unavailable(format!("Redis connection failed: {e}")))?;

        Ok(CartStore { conn })
    }

    /// Hash key for a user's cart.
    fn key(user_id: &str) -> String {
        format!("cart:{user_id}")
    }

    /// Adds a quantity of a book to the cart.
    ///
    /// Adding a book already in the cart increments its stored quantity
    /// (hash-map merge). Returns the resulting quantity.
    pub async fn add_item(
        &self,
        user_id: &str,
        book_id: &str,
        quantity: i64,
    ) -> Result<i64, ApiError> {
        let key = Self::key(user_id);
        let mut conn = self.conn.clone();

        // Cap the number of distinct books before inserting a new field
        let exists: bool = conn.hexists(&key, book_id).await?;
        if !exists {
            let len: i64 = conn.hlen(&key).await?;
            if len >= MAX_CART_ITEMS {
                return Err(CoreError::CartTooLarge {
                    max: MAX_CART_ITEMS,
                }
                .into());
            }
        }

        let new_quantity: i64 = conn.hincr(&key, book_id, quantity).await?;

        if new_quantity > MAX_ITEM_QUANTITY {
            // Undo the increment before reporting the violation
            let _: i64 = conn.hincr(&key, book_id, -quantity).await?;
            return Err(CoreError::QuantityTooLarge {
                requested: new_quantity,
                max: MAX_ITEM_QUANTITY,
            }
            .into());
        }

        debug!(user_id, book_id, quantity = new_quantity, "Cart item added");
        Ok(new_quantity)
    }

    /// Sets the quantity of a book already in the cart.
    ///
    /// A quantity of zero removes the entry.
    pub async fn set_quantity(
        &self,
        user_id: &str,
        book_id: &str,
        quantity: i64,
    ) -> Result<(), ApiError> {
        let key = Self::key(user_id);
        let mut conn = self.conn.clone();

        if quantity == 0 {
            return self.remove_item(user_id, book_id).await;
        }

        let exists: bool = conn.hexists(&key, book_id).await?;
        if !exists {
            return Err(ApiError::NotFound(format!("Book {book_id} not in cart")));
        }

        let _: i64 = conn.hset(&key, book_id, quantity).await?;

        debug!(user_id, book_id, quantity, "Cart quantity set");
        Ok(())
    }

    /// Removes a book from the cart.
    pub async fn remove_item(&self, user_id: &str, book_id: &str) -> Result<(), ApiError> {
        let mut conn = self.conn.clone();

        let removed: i64 = conn.hdel(Self::key(user_id), book_id).await?;
        if removed == 0 {
            return Err(ApiError::NotFound(format!("Book {book_id} not in cart")));
        }

        debug!(user_id, book_id, "Cart item removed");
        Ok(())
    }

    /// Returns the cart's (book id, quantity) pairs, sorted by book id for
    /// a stable response order.
    pub async fn items(&self, user_id: &str) -> Result<Vec<(String, i64)>, ApiError> {
        let mut conn = self.conn.clone();

        let map: HashMap<String, i64> = conn.hgetall(Self::key(user_id)).await?;

        let mut items: Vec<(String, i64)> = map.into_iter().collect();
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    /// Deletes the whole cart.
    pub async fn clear(&self, user_id: &str) -> Result<(), ApiError> {
        let mut conn = self.conn.clone();

        let _: i64 = conn.del(Self::key(user_id)).await?;

        debug!(user_id, "Cart cleared");
        Ok(())
    }
}
