//! # Promotion Repository
//!
//! Database operations for promotions and the discount columns they own.
//!
//! ## Discount Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Promotion Lifecycle                                 │
//! │                                                                         │
//! │  1. CREATE                                                              │
//! │     └── insert() → Promotion { discount_percentage }                   │
//! │                                                                         │
//! │  2. ATTACH BOOKS                                                        │
//! │     └── attach_book() → final_price recomputed, pct + stamp written    │
//! │                                                                         │
//! │  3. (OPTIONAL) CHANGE PERCENTAGE                                        │
//! │     └── update() → every attached book repriced in the same tx         │
//! │                                                                         │
//! │  4. DETACH / DELETE                                                     │
//! │     └── detach_book() / delete() → final_price reset to list price,    │
//! │         pct zeroed, stamp cleared (delete covers all books in one tx)  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All discount math goes through `folio_core::Price`; SQL only ever copies
//! `price_millis` back into `final_price_millis` on reset, where no
//! arithmetic is involved.

use sqlx::PgPool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use folio_core::pagination::{PageRequest, PageResult};
use folio_core::{Price, Promotion};

/// Repository for promotion database operations.
#[derive(Debug, Clone)]
pub struct PromotionRepository {
    pool: PgPool,
}

impl PromotionRepository {
    /// Creates a new PromotionRepository.
    pub fn new(pool: PgPool) -> Self {
        PromotionRepository { pool }
    }

    /// Lists promotions, optionally paginated, newest first.
    pub async fn list(&self, page: Option<PageRequest>) -> DbResult<PageResult<Promotion>> {
        match page {
            Some(request) => {
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM promotions")
                    .fetch_one(&self.pool)
                    .await?;

                let promotions = sqlx::query_as::<_, Promotion>(
                    "SELECT id, name, discount_percentage, created_at, updated_at \
                     FROM promotions ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                )
                .bind(request.limit())
                .bind(request.offset())
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::new(promotions, total, request))
            }
            None => {
                let promotions = sqlx::query_as::<_, Promotion>(
                    "SELECT id, name, discount_percentage, created_at, updated_at \
                     FROM promotions ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::unpaginated(promotions))
            }
        }
    }

    /// Gets a promotion by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Promotion>> {
        let promotion = sqlx::query_as::<_, Promotion>(
            "SELECT id, name, discount_percentage, created_at, updated_at \
             FROM promotions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(promotion)
    }

    /// Inserts a new promotion.
    pub async fn insert(&self, promotion: &Promotion) -> DbResult<()> {
        debug!(id = %promotion.id, name = %promotion.name, "Inserting promotion");

        sqlx::query(
            "INSERT INTO promotions (id, name, discount_percentage, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&promotion.id)
        .bind(&promotion.name)
        .bind(promotion.discount_percentage)
        .bind(promotion.created_at)
        .bind(promotion.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a promotion and reprices every attached book.
    ///
    /// Runs in one transaction: either the promotion and all of its books
    /// reflect the new percentage, or none of them do.
    pub async fn update(&self, promotion: &Promotion) -> DbResult<()> {
        debug!(
            id = %promotion.id,
            discount_percentage = promotion.discount_percentage,
            "Updating promotion"
        );

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE promotions SET name = $2, discount_percentage = $3, updated_at = $4 \
             WHERE id = $1",
        )
        .bind(&promotion.id)
        .bind(&promotion.name)
        .bind(promotion.discount_percentage)
        .bind(promotion.updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Promotion", &promotion.id));
        }

        // Reprice attached books with the new percentage
        let books: Vec<(String, i64)> =
            sqlx::query_as("SELECT id, price_millis FROM books WHERE promotion_id = $1")
                .bind(&promotion.id)
                .fetch_all(&mut *tx)
                .await?;

        for (book_id, price_millis) in &books {
            let final_price = Price::from_millis(*price_millis)
                .apply_discount(promotion.discount_percentage as u32);

            sqlx::query(
                "UPDATE books SET discount_percentage = $2, final_price_millis = $3, \
                 updated_at = NOW() WHERE id = $1",
            )
            .bind(book_id)
            .bind(promotion.discount_percentage)
            .bind(final_price.millis())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(repriced = books.len(), "Promotion updated");
        Ok(())
    }

    /// Deletes a promotion, detaching all of its books in the same
    /// transaction.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        // Reset every attached book: final price back to list price,
        // percentage zeroed, stamp cleared
        sqlx::query(
            "UPDATE books SET final_price_millis = price_millis, discount_percentage = 0, \
             discounted_at = NULL, promotion_id = NULL, updated_at = NOW() \
             WHERE promotion_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM promotions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Promotion", id));
        }

        tx.commit().await?;

        debug!(id = %id, "Deleted promotion");
        Ok(())
    }

    /// Attaches a book to a promotion.
    ///
    /// Applies the promotion's discount to the book's list price, stamps
    /// the discount timestamp, and links the book, all in one transaction.
    pub async fn attach_book(&self, promotion_id: &str, book_id: &str) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let promotion: Option<(i32,)> =
            sqlx::query_as("SELECT discount_percentage FROM promotions WHERE id = $1")
                .bind(promotion_id)
                .fetch_optional(&mut *tx)
                .await?;

        let (discount_percentage,) = promotion
            .ok_or_else(|| DbError::not_found("Promotion", promotion_id))?;

        let book: Option<(i64,)> = sqlx::query_as(
            "SELECT price_millis FROM books WHERE id = $1 AND is_active = TRUE",
        )
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (price_millis,) = book.ok_or_else(|| DbError::not_found("Book", book_id))?;

        let final_price = Price::from_millis(price_millis).apply_discount(discount_percentage as u32);

        sqlx::query(
            "UPDATE books SET promotion_id = $2, discount_percentage = $3, \
             final_price_millis = $4, discounted_at = NOW(), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(book_id)
        .bind(promotion_id)
        .bind(discount_percentage)
        .bind(final_price.millis())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            promotion_id = %promotion_id,
            book_id = %book_id,
            discount_percentage,
            "Attached book to promotion"
        );
        Ok(())
    }

    /// Detaches a book from its promotion.
    ///
    /// Resets the final price to the list price, zeroes the percentage,
    /// and clears the discount stamp.
    pub async fn detach_book(&self, promotion_id: &str, book_id: &str) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE books SET final_price_millis = price_millis, discount_percentage = 0, \
             discounted_at = NULL, promotion_id = NULL, updated_at = NOW() \
             WHERE id = $1 AND promotion_id = $2",
        )
        .bind(book_id)
        .bind(promotion_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book in promotion", book_id));
        }

        debug!(promotion_id = %promotion_id, book_id = %book_id, "Detached book from promotion");
        Ok(())
    }
}
