use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub id: i32,
    pub module_id: i32,
    pub parent_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub created_by: String,
    pub created_on: DateTime<Utc>,
    pub modified_by: String,
    pub modified_on: DateTime<Utc>,
}

/// Data for creating or replacing a category's editable fields
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
}
