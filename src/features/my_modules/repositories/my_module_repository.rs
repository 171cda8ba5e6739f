use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::my_modules::models::MyModule;

/// Storage for my-module records; ids and audit columns are assigned here
#[async_trait]
pub trait MyModuleRepository: Send + Sync {
    async fn create(&self, module_id: i32, name: &str, actor: &str) -> Result<MyModule>;

    /// One page of a module's records ordered by id, plus the module total
    async fn list_page(
        &self,
        module_id: i32,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<MyModule>, i64)>;

    async fn list_by_module(&self, module_id: i32) -> Result<Vec<MyModule>>;

    async fn find(&self, id: i32) -> Result<Option<MyModule>>;

    async fn update_name(&self, id: i32, name: &str, actor: &str) -> Result<Option<MyModule>>;

    async fn delete(&self, id: i32) -> Result<bool>;

    async fn list_modified_since(
        &self,
        module_id: i32,
        since: DateTime<Utc>,
    ) -> Result<Vec<MyModule>>;
}

const MY_MODULE_COLUMNS: &str =
    "id, module_id, name, created_by, created_on, modified_by, modified_on";

/// PostgreSQL-backed my-module storage
pub struct PgMyModuleRepository {
    pool: PgPool,
}

impl PgMyModuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MyModuleRepository for PgMyModuleRepository {
    async fn create(&self, module_id: i32, name: &str, actor: &str) -> Result<MyModule> {
        let query = format!(
            r#"
            INSERT INTO my_modules (module_id, name, created_by, modified_by)
            VALUES ($1, $2, $3, $3)
            RETURNING {}
            "#,
            MY_MODULE_COLUMNS
        );

        sqlx::query_as::<_, MyModule>(&query)
            .bind(module_id)
            .bind(name)
            .bind(actor)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create my-module: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_page(
        &self,
        module_id: i32,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<MyModule>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM my_modules WHERE module_id = $1")
            .bind(module_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let query = format!(
            r#"
            SELECT {}
            FROM my_modules
            WHERE module_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
            MY_MODULE_COLUMNS
        );

        let records = sqlx::query_as::<_, MyModule>(&query)
            .bind(module_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list my-modules: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((records, total))
    }

    async fn list_by_module(&self, module_id: i32) -> Result<Vec<MyModule>> {
        let query = format!(
            "SELECT {} FROM my_modules WHERE module_id = $1 ORDER BY id",
            MY_MODULE_COLUMNS
        );

        sqlx::query_as::<_, MyModule>(&query)
            .bind(module_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find(&self, id: i32) -> Result<Option<MyModule>> {
        let query = format!("SELECT {} FROM my_modules WHERE id = $1", MY_MODULE_COLUMNS);

        sqlx::query_as::<_, MyModule>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_name(&self, id: i32, name: &str, actor: &str) -> Result<Option<MyModule>> {
        let query = format!(
            r#"
            UPDATE my_modules
            SET name = $1, modified_by = $2, modified_on = NOW()
            WHERE id = $3
            RETURNING {}
            "#,
            MY_MODULE_COLUMNS
        );

        sqlx::query_as::<_, MyModule>(&query)
            .bind(name)
            .bind(actor)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update my-module: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM my_modules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_modified_since(
        &self,
        module_id: i32,
        since: DateTime<Utc>,
    ) -> Result<Vec<MyModule>> {
        let query = format!(
            r#"
            SELECT {}
            FROM my_modules
            WHERE module_id = $1 AND modified_on >= $2
            ORDER BY modified_on, id
            "#,
            MY_MODULE_COLUMNS
        );

        sqlx::query_as::<_, MyModule>(&query)
            .bind(module_id)
            .bind(since)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
