//! # Author Repository
//!
//! Database operations for authors.

use sqlx::PgPool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use folio_core::pagination::{PageRequest, PageResult};
use folio_core::Author;

/// Repository for author database operations.
#[derive(Debug, Clone)]
pub struct AuthorRepository {
    pool: PgPool,
}

impl AuthorRepository {
    /// Creates a new AuthorRepository.
    pub fn new(pool: PgPool) -> Self {
        AuthorRepository { pool }
    }

    /// Lists authors, optionally paginated, ordered by name.
    pub async fn list(&self, page: Option<PageRequest>) -> DbResult<PageResult<Author>> {
        match page {
            Some(request) => {
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
                    .fetch_one(&self.pool)
                    .await?;

                let authors = sqlx::query_as::<_, Author>(
                    "SELECT id, name, biography, created_at, updated_at \
                     FROM authors ORDER BY name LIMIT $1 OFFSET $2",
                )
                .bind(request.limit())
                .bind(request.offset())
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::new(authors, total, request))
            }
            None => {
                let authors = sqlx::query_as::<_, Author>(
                    "SELECT id, name, biography, created_at, updated_at \
                     FROM authors ORDER BY name",
                )
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::unpaginated(authors))
            }
        }
    }

    /// Gets an author by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, name, biography, created_at, updated_at FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    /// Inserts a new author.
    pub async fn insert(&self, author: &Author) -> DbResult<()> {
        debug!(id = %author.id, name = %author.name, "Inserting author");

        sqlx::query(
            "INSERT INTO authors (id, name, biography, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&author.id)
        .bind(&author.name)
        .bind(&author.biography)
        .bind(author.created_at)
        .bind(author.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an author.
    pub async fn update(&self, author: &Author) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE authors SET name = $2, biography = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(&author.id)
        .bind(&author.name)
        .bind(&author.biography)
        .bind(author.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Author", &author.id));
        }

        Ok(())
    }

    /// Deletes an author.
    ///
    /// Fails with a foreign key violation if any book still references it;
    /// the catalog must be reassigned first.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Author", id));
        }

        Ok(())
    }
}
