//! # Book Repository
//!
//! Database operations for the catalog's books.
//!
//! ## Pricing Columns
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  price_millis          list price, set on create/update                │
//! │  final_price_millis    effective price, rewritten by promotions        │
//! │  discount_percentage   0 when no promotion is attached                 │
//! │  discounted_at         stamp of the last promotion attachment          │
//! │                                                                         │
//! │  The promotion repository owns every write to the three discount       │
//! │  columns; this repository only resets them on create/update.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::PgPool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use folio_core::pagination::{PageRequest, PageResult};
use folio_core::Book;

/// Columns selected for every Book row, kept in one place so list and get
/// queries cannot drift apart.
const BOOK_COLUMNS: &str = "id, title, description, price_millis, final_price_millis, \
     discount_percentage, discounted_at, promotion_id, cover_image, \
     author_id, category_id, is_active, created_at, updated_at";

/// Repository for book database operations.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: PgPool) -> Self {
        BookRepository { pool }
    }

    /// Lists active books, optionally paginated, ordered by title.
    ///
    /// With a page request the result carries the exact total count and the
    /// ceiling page count; without one the whole catalog comes back as a
    /// single page.
    pub async fn list(&self, page: Option<PageRequest>) -> DbResult<PageResult<Book>> {
        match page {
            Some(request) => {
                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE is_active = TRUE")
                        .fetch_one(&self.pool)
                        .await?;

                let books = sqlx::query_as::<_, Book>(&format!(
                    "SELECT {BOOK_COLUMNS} FROM books \
                     WHERE is_active = TRUE ORDER BY title LIMIT $1 OFFSET $2"
                ))
                .bind(request.limit())
                .bind(request.offset())
                .fetch_all(&self.pool)
                .await?;

                debug!(count = books.len(), total, "Listed books page");
                Ok(PageResult::new(books, total, request))
            }
            None => {
                let books = sqlx::query_as::<_, Book>(&format!(
                    "SELECT {BOOK_COLUMNS} FROM books WHERE is_active = TRUE ORDER BY title"
                ))
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::unpaginated(books))
            }
        }
    }

    /// Lists active books in a category, optionally paginated.
    pub async fn list_by_category(
        &self,
        category_id: &str,
        page: Option<PageRequest>,
    ) -> DbResult<PageResult<Book>> {
        match page {
            Some(request) => {
                let total: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM books WHERE is_active = TRUE AND category_id = $1",
                )
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;

                let books = sqlx::query_as::<_, Book>(&format!(
                    "SELECT {BOOK_COLUMNS} FROM books \
                     WHERE is_active = TRUE AND category_id = $1 \
                     ORDER BY title LIMIT $2 OFFSET $3"
                ))
                .bind(category_id)
                .bind(request.limit())
                .bind(request.offset())
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::new(books, total, request))
            }
            None => {
                let books = sqlx::query_as::<_, Book>(&format!(
                    "SELECT {BOOK_COLUMNS} FROM books \
                     WHERE is_active = TRUE AND category_id = $1 ORDER BY title"
                ))
                .bind(category_id)
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::unpaginated(books))
            }
        }
    }

    /// Gets a book by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Book))` - Book found (active or not)
    /// * `Ok(None)` - Book not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Gets an active book by ID, treating inactive as absent.
    ///
    /// Cart and order paths use this so deactivated books cannot be bought.
    pub async fn get_active_by_id(&self, id: &str) -> DbResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = $1 AND is_active = TRUE"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Inserts a new book.
    pub async fn insert(&self, book: &Book) -> DbResult<()> {
        debug!(id = %book.id, title = %book.title, "Inserting book");

        sqlx::query(
            r#"
            INSERT INTO books (
                id, title, description, price_millis, final_price_millis,
                discount_percentage, discounted_at, promotion_id, cover_image,
                author_id, category_id, is_active, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8, $9,
                $10, $11, $12, $13, $14
            )
            "#,
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(&book.description)
        .bind(book.price_millis)
        .bind(book.final_price_millis)
        .bind(book.discount_percentage)
        .bind(book.discounted_at)
        .bind(&book.promotion_id)
        .bind(&book.cover_image)
        .bind(&book.author_id)
        .bind(&book.category_id)
        .bind(book.is_active)
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a book's editable fields.
    ///
    /// The discount columns are not touched here; a price change while a
    /// promotion is attached keeps the discounted final price in step by
    /// recomputing it from the stored percentage.
    pub async fn update(&self, book: &Book) -> DbResult<()> {
        debug!(id = %book.id, "Updating book");

        let result = sqlx::query(
            r#"
            UPDATE books SET
                title = $2,
                description = $3,
                price_millis = $4,
                final_price_millis = $5,
                cover_image = $6,
                author_id = $7,
                category_id = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(&book.description)
        .bind(book.price_millis)
        .bind(book.final_price_millis)
        .bind(&book.cover_image)
        .bind(&book.author_id)
        .bind(&book.category_id)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", &book.id));
        }

        Ok(())
    }

    /// Deactivates a book (soft delete).
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        let result =
            sqlx::query("UPDATE books SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", id));
        }

        debug!(id = %id, "Deactivated book");
        Ok(())
    }
}
