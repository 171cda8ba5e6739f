use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::{Category, CreateCategory};

/// One category in an export payload.
///
/// Audit fields travel as plain strings: they are informational and never
/// restored on import. Field aliases accept exports produced by the earlier
/// PascalCase module format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryTransferDto {
    #[serde(alias = "CategoryId")]
    pub id: i32,

    #[serde(default, alias = "ModuleId")]
    pub module_id: i32,

    #[serde(
        alias = "Name",
        deserialize_with = "crate::shared::validation::trimmed_string"
    )]
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub name: String,

    #[serde(default, alias = "Description")]
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,

    #[serde(default, alias = "ParentCategoryId")]
    pub parent_id: Option<i32>,

    #[serde(default, alias = "CreatedBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(default, alias = "CreatedOn", skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,

    #[serde(default, alias = "ModifiedBy", skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,

    #[serde(default, alias = "ModifiedOn", skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<String>,
}

impl From<Category> for CategoryTransferDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            module_id: c.module_id,
            name: c.name,
            description: c.description,
            parent_id: c.parent_id,
            created_by: Some(c.created_by),
            created_on: Some(c.created_on.to_rfc3339()),
            modified_by: Some(c.modified_by),
            modified_on: Some(c.modified_on.to_rfc3339()),
        }
    }
}

impl CategoryTransferDto {
    /// Values to recreate this record under `parent_id` in the target module
    pub fn to_create(&self, parent_id: Option<i32>) -> CreateCategory {
        CreateCategory {
            name: self.name.clone(),
            description: self.description.clone(),
            parent_id,
        }
    }
}
