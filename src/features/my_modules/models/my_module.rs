use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a module's named record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MyModule {
    pub id: i32,
    pub module_id: i32,
    pub name: String,
    pub created_by: String,
    pub created_on: DateTime<Utc>,
    pub modified_by: String,
    pub modified_on: DateTime<Utc>,
}
