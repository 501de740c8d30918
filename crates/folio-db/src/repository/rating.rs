//! # Rating Repository
//!
//! Database operations for book ratings. One rating per (user, book),
//! upserted on repeat submissions.

use sqlx::PgPool;
use tracing::debug;

use crate::error::DbResult;
use folio_core::pagination::{PageRequest, PageResult};
use folio_core::Rating;

const RATING_COLUMNS: &str =
    "id, book_id, user_id, stars, comment, created_at, updated_at";

/// Repository for rating database operations.
#[derive(Debug, Clone)]
pub struct RatingRepository {
    pool: PgPool,
}

impl RatingRepository {
    /// Creates a new RatingRepository.
    pub fn new(pool: PgPool) -> Self {
        RatingRepository { pool }
    }

    /// Inserts or updates a user's rating of a book.
    ///
    /// A repeat submission replaces the stars and comment and bumps
    /// `updated_at`; the original `created_at` is kept.
    pub async fn upsert(&self, rating: &Rating) -> DbResult<()> {
        debug!(
            book_id = %rating.book_id,
            user_id = %rating.user_id,
            stars = rating.stars,
            "Upserting rating"
        );

        sqlx::query(
            r#"
            INSERT INTO ratings (
                id, book_id, user_id, stars, comment, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (book_id, user_id) DO UPDATE SET
                stars = EXCLUDED.stars,
                comment = EXCLUDED.comment,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&rating.id)
        .bind(&rating.book_id)
        .bind(&rating.user_id)
        .bind(rating.stars)
        .bind(&rating.comment)
        .bind(rating.created_at)
        .bind(rating.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists a book's ratings, optionally paginated, newest first.
    pub async fn list_by_book(
        &self,
        book_id: &str,
        page: Option<PageRequest>,
    ) -> DbResult<PageResult<Rating>> {
        match page {
            Some(request) => {
                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM ratings WHERE book_id = $1")
                        .bind(book_id)
                        .fetch_one(&self.pool)
                        .await?;

                let ratings = sqlx::query_as::<_, Rating>(&format!(
                    "SELECT {RATING_COLUMNS} FROM ratings WHERE book_id = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3"
                ))
                .bind(book_id)
                .bind(request.limit())
                .bind(request.offset())
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::new(ratings, total, request))
            }
            None => {
                let ratings = sqlx::query_as::<_, Rating>(&format!(
                    "SELECT {RATING_COLUMNS} FROM ratings WHERE book_id = $1 \
                     ORDER BY created_at DESC"
                ))
                .bind(book_id)
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::unpaginated(ratings))
            }
        }
    }

    /// Returns the average star count for a book, if it has any ratings.
    pub async fn average_for_book(&self, book_id: &str) -> DbResult<Option<f64>> {
        let average: Option<f64> = sqlx::query_scalar(
            "SELECT AVG(stars)::FLOAT8 FROM ratings WHERE book_id = $1",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(average)
    }
}
