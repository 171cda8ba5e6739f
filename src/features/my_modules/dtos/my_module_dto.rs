use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::my_modules::models::MyModule;

/// Request DTO for creating a record
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMyModuleDto {
    #[serde(deserialize_with = "crate::shared::validation::trimmed_string")]
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub name: String,
}

/// Request DTO for renaming a record
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMyModuleDto {
    #[serde(deserialize_with = "crate::shared::validation::trimmed_string")]
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub name: String,
}

/// Response DTO for a record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MyModuleResponseDto {
    pub id: i32,
    pub module_id: i32,
    pub name: String,
    pub created_by: String,
    pub created_on: DateTime<Utc>,
    pub modified_by: String,
    pub modified_on: DateTime<Utc>,
}

impl From<MyModule> for MyModuleResponseDto {
    fn from(m: MyModule) -> Self {
        Self {
            id: m.id,
            module_id: m.module_id,
            name: m.name,
            created_by: m.created_by,
            created_on: m.created_on,
            modified_by: m.modified_by,
            modified_on: m.modified_on,
        }
    }
}

/// One record in an export payload; only `name` is restored on import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct MyModuleTransferDto {
    #[serde(default, alias = "Id")]
    pub id: i32,

    #[serde(default, alias = "ModuleId")]
    pub module_id: i32,

    #[serde(
        alias = "Name",
        deserialize_with = "crate::shared::validation::trimmed_string"
    )]
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub name: String,

    #[serde(default, alias = "CreatedBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(default, alias = "CreatedOn", skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,

    #[serde(default, alias = "ModifiedBy", skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,

    #[serde(default, alias = "ModifiedOn", skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<String>,
}

impl From<MyModule> for MyModuleTransferDto {
    fn from(m: MyModule) -> Self {
        Self {
            id: m.id,
            module_id: m.module_id,
            name: m.name,
            created_by: Some(m.created_by),
            created_on: Some(m.created_on.to_rfc3339()),
            modified_by: Some(m.modified_by),
            modified_on: Some(m.modified_on.to_rfc3339()),
        }
    }
}
