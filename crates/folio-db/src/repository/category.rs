//! # Category Repository
//!
//! Database operations for catalog categories.

use sqlx::PgPool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use folio_core::pagination::{PageRequest, PageResult};
use folio_core::Category;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: PgPool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists categories, optionally paginated, ordered by name.
    pub async fn list(&self, page: Option<PageRequest>) -> DbResult<PageResult<Category>> {
        match page {
            Some(request) => {
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
                    .fetch_one(&self.pool)
                    .await?;

                let categories = sqlx::query_as::<_, Category>(
                    "SELECT id, name, description, created_at, updated_at \
                     FROM categories ORDER BY name LIMIT $1 OFFSET $2",
                )
                .bind(request.limit())
                .bind(request.offset())
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::new(categories, total, request))
            }
            None => {
                let categories = sqlx::query_as::<_, Category>(
                    "SELECT id, name, description, created_at, updated_at \
                     FROM categories ORDER BY name",
                )
                .fetch_all(&self.pool)
                .await?;

                Ok(PageResult::unpaginated(categories))
            }
        }
    }

    /// Gets a category by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, created_at, updated_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Inserts a new category.
    pub async fn insert(&self, category: &Category) -> DbResult<()> {
        debug!(id = %category.id, name = %category.name, "Inserting category");

        sqlx::query(
            "INSERT INTO categories (id, name, description, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a category.
    pub async fn update(&self, category: &Category) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE categories SET name = $2, description = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", &category.id));
        }

        Ok(())
    }

    /// Deletes a category.
    ///
    /// Fails with a foreign key violation if any book is still filed here.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}
