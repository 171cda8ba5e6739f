use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, ListCategoriesQuery, ListChildrenQuery,
    UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::search::{SearchContentDto, SearchContentQuery};
use crate::shared::types::{ApiResponse, AuditUser, Meta};

/// List all categories of a module
///
/// Returns categories as flat list or tree structure based on `tree` query param.
/// The tree nests at most `MAX_CATEGORY_TREE_DEPTH` levels; deeper categories
/// are listed under their ancestor at the last nested level.
#[utoipa::path(
    get,
    path = "/api/modules/{module_id}/categories",
    params(
        ("module_id" = i32, Path, description = "Module ID"),
        ListCategoriesQuery
    ),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    Path(module_id): Path<i32>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    let (value, total) = if query.tree {
        let tree = service.list_tree(module_id).await?;
        let total = tree.len() as i64;
        (serde_json::to_value(tree), total)
    } else {
        let categories = service.list(module_id).await?;
        let total = categories.len() as i64;
        (serde_json::to_value(categories), total)
    };

    let value =
        value.map_err(|e| AppError::Internal(format!("Failed to encode categories: {}", e)))?;
    Ok(Json(ApiResponse::success(
        Some(value),
        None,
        Some(Meta { total }),
    )))
}

/// List direct children of a category
///
/// Without `parent_id` the root categories of the module are returned.
#[utoipa::path(
    get,
    path = "/api/modules/{module_id}/categories/children",
    params(
        ("module_id" = i32, Path, description = "Module ID"),
        ListChildrenQuery
    ),
    responses(
        (status = 200, description = "Child categories ordered by name", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 404, description = "Parent category not found")
    ),
    tag = "categories"
)]
pub async fn list_children(
    State(service): State<Arc<CategoryService>>,
    Path(module_id): Path<i32>,
    Query(query): Query<ListChildrenQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list_by_parent(module_id, query.parent_id).await?;
    Ok(Json(ApiResponse::success(Some(categories), None, None)))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/api/modules/{module_id}/categories/{id}",
    params(
        ("module_id" = i32, Path, description = "Module ID"),
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path((module_id, id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get(module_id, id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/modules/{module_id}/categories",
    params(
        ("module_id" = i32, Path, description = "Module ID")
    ),
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "categories"
)]
pub async fn create_category(
    user: AuditUser,
    State(service): State<Arc<CategoryService>>,
    Path(module_id): Path<i32>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(module_id, &dto, &user).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category), None, None)),
    ))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/modules/{module_id}/categories/{id}",
    params(
        ("module_id" = i32, Path, description = "Module ID"),
        ("id" = i32, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Parent would create a cycle")
    ),
    tag = "categories"
)]
pub async fn update_category(
    user: AuditUser,
    State(service): State<Arc<CategoryService>>,
    Path((module_id, id)): Path<(i32, i32)>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(module_id, id, &dto, &user).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category
///
/// Direct children of the deleted category become root categories.
#[utoipa::path(
    delete,
    path = "/api/modules/{module_id}/categories/{id}",
    params(
        ("module_id" = i32, Path, description = "Module ID"),
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path((module_id, id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(module_id, id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Search index entries for categories modified since a point in time
#[utoipa::path(
    get,
    path = "/api/modules/{module_id}/categories/search-content",
    params(
        ("module_id" = i32, Path, description = "Module ID"),
        SearchContentQuery
    ),
    responses(
        (status = 200, description = "Search content", body = ApiResponse<Vec<SearchContentDto>>),
    ),
    tag = "categories"
)]
pub async fn category_search_content(
    State(service): State<Arc<CategoryService>>,
    Path(module_id): Path<i32>,
    Query(query): Query<SearchContentQuery>,
) -> Result<Json<ApiResponse<Vec<SearchContentDto>>>> {
    let contents = service
        .search_contents(module_id, query.since_or_epoch())
        .await?;
    Ok(Json(ApiResponse::success(Some(contents), None, None)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::features::categories::routes;
    use crate::features::categories::services::CategoryPortabilityService;
    use crate::shared::constants::MAX_CATEGORY_TREE_DEPTH;
    use crate::shared::test_helpers::{with_audit_user, InMemoryCategoryRepository, TEST_AUDIT_USER};

    use super::*;

    fn server() -> (TestServer, Arc<InMemoryCategoryRepository>) {
        let repository = Arc::new(InMemoryCategoryRepository::new());
        let router = routes::routes(
            Arc::new(CategoryService::new(repository.clone())),
            Arc::new(CategoryPortabilityService::new(repository.clone())),
        );
        (TestServer::new(with_audit_user(router)).unwrap(), repository)
    }

    #[tokio::test]
    async fn test_create_returns_created() {
        let (server, _) = server();

        let response = server
            .post("/api/modules/1/categories")
            .json(&json!({"name": "Docs", "description": "Documents"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["name"], "Docs");
        assert_eq!(body["data"]["created_by"], TEST_AUDIT_USER);
    }

    #[tokio::test]
    async fn test_create_blank_name_is_rejected() {
        let (server, repository) = server();

        let response = server
            .post("/api/modules/1/categories")
            .json(&json!({"name": "   "}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(repository.create_calls().await, 0);
    }

    #[tokio::test]
    async fn test_create_accepts_padded_name_at_length_limit() {
        let (server, _) = server();
        let name = "x".repeat(100);

        let response = server
            .post("/api/modules/1/categories")
            .json(&json!({"name": format!("  {}  ", name)}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["name"], name);
    }

    #[tokio::test]
    async fn test_get_missing_category_is_not_found() {
        let (server, _) = server();

        let response = server.get("/api/modules/1/categories/42").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_update_into_own_subtree_is_conflict() {
        let (server, repository) = server();
        let root = repository.seed(1, "Root", None, None).await;
        let child = repository.seed(1, "Child", None, Some(root.id)).await;

        let response = server
            .put(&format!("/api/modules/1/categories/{}", root.id))
            .json(&json!({"name": "Root", "parent_id": child.id}))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_list_tree_of_deep_chain_is_capped() {
        let (server, repository) = server();
        let mut parent = repository.seed(1, "c0", None, None).await;
        for depth in 1..200 {
            parent = repository
                .seed(1, &format!("c{}", depth), None, Some(parent.id))
                .await;
        }

        let response = server
            .get("/api/modules/1/categories")
            .add_query_param("tree", true)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 1);

        let mut node = &body["data"][0];
        let mut levels = 1;
        while let Some(first) = node["children"].as_array().and_then(|c| c.first()) {
            node = first;
            levels += 1;
        }
        assert_eq!(levels, MAX_CATEGORY_TREE_DEPTH + 1);
    }
}
