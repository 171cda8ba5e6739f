use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::my_modules::dtos::{
    CreateMyModuleDto, MyModuleResponseDto, UpdateMyModuleDto,
};
use crate::features::my_modules::services::MyModuleService;
use crate::shared::portability::{ModuleExportDto, ModuleImportDto};
use crate::shared::search::{SearchContentDto, SearchContentQuery};
use crate::shared::types::{ApiResponse, AuditUser, Meta, PaginationQuery};

/// List records of a module
#[utoipa::path(
    get,
    path = "/api/modules/{module_id}/my-modules",
    params(
        ("module_id" = i32, Path, description = "Module ID"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Page of records", body = ApiResponse<Vec<MyModuleResponseDto>>),
    ),
    tag = "my-modules"
)]
pub async fn list_my_modules(
    State(service): State<Arc<MyModuleService>>,
    Path(module_id): Path<i32>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<MyModuleResponseDto>>>> {
    let (records, total) = service.list(module_id, &pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(records),
        None,
        Some(Meta { total }),
    )))
}

/// Get record by ID
#[utoipa::path(
    get,
    path = "/api/modules/{module_id}/my-modules/{id}",
    params(
        ("module_id" = i32, Path, description = "Module ID"),
        ("id" = i32, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Record found", body = ApiResponse<MyModuleResponseDto>),
        (status = 404, description = "Record not found")
    ),
    tag = "my-modules"
)]
pub async fn get_my_module(
    State(service): State<Arc<MyModuleService>>,
    Path((module_id, id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<MyModuleResponseDto>>> {
    let record = service.get(module_id, id).await?;
    Ok(Json(ApiResponse::success(Some(record), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/modules/{module_id}/my-modules",
    params(
        ("module_id" = i32, Path, description = "Module ID")
    ),
    request_body = CreateMyModuleDto,
    responses(
        (status = 201, description = "Record created", body = ApiResponse<MyModuleResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "my-modules"
)]
pub async fn create_my_module(
    user: AuditUser,
    State(service): State<Arc<MyModuleService>>,
    Path(module_id): Path<i32>,
    AppJson(dto): AppJson<CreateMyModuleDto>,
) -> Result<(StatusCode, Json<ApiResponse<MyModuleResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let record = service.create(module_id, &dto, &user).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(record), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/modules/{module_id}/my-modules/{id}",
    params(
        ("module_id" = i32, Path, description = "Module ID"),
        ("id" = i32, Path, description = "Record ID")
    ),
    request_body = UpdateMyModuleDto,
    responses(
        (status = 200, description = "Record updated", body = ApiResponse<MyModuleResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Record not found")
    ),
    tag = "my-modules"
)]
pub async fn update_my_module(
    user: AuditUser,
    State(service): State<Arc<MyModuleService>>,
    Path((module_id, id)): Path<(i32, i32)>,
    AppJson(dto): AppJson<UpdateMyModuleDto>,
) -> Result<Json<ApiResponse<MyModuleResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let record = service.update(module_id, id, &dto, &user).await?;
    Ok(Json(ApiResponse::success(Some(record), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/modules/{module_id}/my-modules/{id}",
    params(
        ("module_id" = i32, Path, description = "Module ID"),
        ("id" = i32, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Record deleted"),
        (status = 404, description = "Record not found")
    ),
    tag = "my-modules"
)]
pub async fn delete_my_module(
    State(service): State<Arc<MyModuleService>>,
    Path((module_id, id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(module_id, id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Search index entries for records modified since a point in time
#[utoipa::path(
    get,
    path = "/api/modules/{module_id}/my-modules/search-content",
    params(
        ("module_id" = i32, Path, description = "Module ID"),
        SearchContentQuery
    ),
    responses(
        (status = 200, description = "Search content", body = ApiResponse<Vec<SearchContentDto>>),
    ),
    tag = "my-modules"
)]
pub async fn my_module_search_content(
    State(service): State<Arc<MyModuleService>>,
    Path(module_id): Path<i32>,
    Query(query): Query<SearchContentQuery>,
) -> Result<Json<ApiResponse<Vec<SearchContentDto>>>> {
    let contents = service
        .search_contents(module_id, query.since_or_epoch())
        .await?;
    Ok(Json(ApiResponse::success(Some(contents), None, None)))
}

/// Export all records of a module
#[utoipa::path(
    get,
    path = "/api/modules/{module_id}/my-modules/export",
    params(
        ("module_id" = i32, Path, description = "Module ID")
    ),
    responses(
        (status = 200, description = "Serialized records", body = ApiResponse<ModuleExportDto>),
    ),
    tag = "my-modules"
)]
pub async fn export_my_modules(
    State(service): State<Arc<MyModuleService>>,
    Path(module_id): Path<i32>,
) -> Result<Json<ApiResponse<ModuleExportDto>>> {
    let export = service.export(module_id).await?;
    Ok(Json(ApiResponse::success(Some(export), None, None)))
}

/// Import records exported from another module
#[utoipa::path(
    post,
    path = "/api/modules/{module_id}/my-modules/import",
    params(
        ("module_id" = i32, Path, description = "Target module ID")
    ),
    request_body = ModuleImportDto,
    responses(
        (status = 200, description = "Records imported"),
        (status = 400, description = "Malformed content, nothing imported")
    ),
    tag = "my-modules"
)]
pub async fn import_my_modules(
    user: AuditUser,
    State(service): State<Arc<MyModuleService>>,
    Path(module_id): Path<i32>,
    AppJson(dto): AppJson<ModuleImportDto>,
) -> Result<Json<ApiResponse<()>>> {
    service
        .import(module_id, &dto.content, &dto.version, &user)
        .await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Records imported".to_string()),
        None,
    )))
}
