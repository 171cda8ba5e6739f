use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};

/// Row counts reported once the database answers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReadinessDto {
    pub database: String,
    pub my_modules: i64,
    pub categories: i64,
}

pub struct HealthService {
    pool: PgPool,
}

impl HealthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn readiness(&self) -> Result<ReadinessDto> {
        let my_modules = self.count_rows("my_modules").await?;
        let categories = self.count_rows("categories").await?;

        Ok(ReadinessDto {
            database: "ok".to_string(),
            my_modules,
            categories,
        })
    }

    async fn count_rows(&self, table: &'static str) -> Result<i64> {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::warn!("Readiness check failed: table={}, error={:?}", table, e);
                AppError::Database(e)
            })
    }
}
