use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CreateCategory};

/// Category storage.
///
/// Implementations assign ids and stamp the audit columns; callers never
/// supply either.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, module_id: i32, data: &CreateCategory, actor: &str) -> Result<Category>;

    /// Every category of a module, ordered by name
    async fn list_by_module(&self, module_id: i32) -> Result<Vec<Category>>;

    /// Direct children of `parent_id` (roots when `None`), ordered by name
    async fn list_by_parent(&self, module_id: i32, parent_id: Option<i32>)
        -> Result<Vec<Category>>;

    async fn find(&self, id: i32) -> Result<Option<Category>>;

    async fn update(&self, id: i32, data: &CreateCategory, actor: &str)
        -> Result<Option<Category>>;

    /// Returns `false` when no row matched. Direct children become roots.
    async fn delete(&self, id: i32) -> Result<bool>;

    async fn list_modified_since(
        &self,
        module_id: i32,
        since: DateTime<Utc>,
    ) -> Result<Vec<Category>>;
}

const CATEGORY_COLUMNS: &str = "id, module_id, parent_id, name, description, \
     created_by, created_on, modified_by, modified_on";

/// PostgreSQL-backed category storage
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(context: &str, e: sqlx::Error) -> AppError {
    tracing::error!("Failed to {}: {:?}", context, e);
    AppError::Database(e)
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, module_id: i32, data: &CreateCategory, actor: &str) -> Result<Category> {
        let query = format!(
            r#"
            INSERT INTO categories (module_id, parent_id, name, description, created_by, modified_by)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(module_id)
            .bind(data.parent_id)
            .bind(&data.name)
            .bind(&data.description)
            .bind(actor)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("create category", e))
    }

    async fn list_by_module(&self, module_id: i32) -> Result<Vec<Category>> {
        let query = format!(
            r#"
            SELECT {}
            FROM categories
            WHERE module_id = $1
            ORDER BY name, id
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(module_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("list categories", e))
    }

    async fn list_by_parent(
        &self,
        module_id: i32,
        parent_id: Option<i32>,
    ) -> Result<Vec<Category>> {
        let query = format!(
            r#"
            SELECT {}
            FROM categories
            WHERE module_id = $1 AND parent_id IS NOT DISTINCT FROM $2
            ORDER BY name, id
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(module_id)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("list categories by parent", e))
    }

    async fn find(&self, id: i32) -> Result<Option<Category>> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("get category", e))
    }

    async fn update(
        &self,
        id: i32,
        data: &CreateCategory,
        actor: &str,
    ) -> Result<Option<Category>> {
        let query = format!(
            r#"
            UPDATE categories
            SET name = $1,
                description = $2,
                parent_id = $3,
                modified_by = $4,
                modified_on = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(&data.name)
            .bind(&data.description)
            .bind(data.parent_id)
            .bind(actor)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("update category", e))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("delete category", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_modified_since(
        &self,
        module_id: i32,
        since: DateTime<Utc>,
    ) -> Result<Vec<Category>> {
        let query = format!(
            r#"
            SELECT {}
            FROM categories
            WHERE module_id = $1 AND modified_on >= $2
            ORDER BY modified_on, id
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(module_id)
            .bind(since)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("list modified categories", e))
    }
}
