use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::categories::services::CategoryPortabilityService;
use crate::shared::portability::{ModuleExportDto, ModuleImportDto};
use crate::shared::types::{ApiResponse, AuditUser};

/// Export all categories of a module
#[utoipa::path(
    get,
    path = "/api/modules/{module_id}/categories/export",
    params(
        ("module_id" = i32, Path, description = "Module ID")
    ),
    responses(
        (status = 200, description = "Serialized categories", body = ApiResponse<ModuleExportDto>),
    ),
    tag = "categories"
)]
pub async fn export_categories(
    State(service): State<Arc<CategoryPortabilityService>>,
    Path(module_id): Path<i32>,
) -> Result<Json<ApiResponse<ModuleExportDto>>> {
    let export = service.export(module_id).await?;
    Ok(Json(ApiResponse::success(Some(export), None, None)))
}

/// Import categories exported from another module
///
/// Parent/child links are rebuilt with the newly assigned ids. Categories
/// whose parent is missing from the content are imported as roots.
#[utoipa::path(
    post,
    path = "/api/modules/{module_id}/categories/import",
    params(
        ("module_id" = i32, Path, description = "Target module ID")
    ),
    request_body = ModuleImportDto,
    responses(
        (status = 200, description = "Categories imported"),
        (status = 400, description = "Malformed content, nothing imported")
    ),
    tag = "categories"
)]
pub async fn import_categories(
    user: AuditUser,
    State(service): State<Arc<CategoryPortabilityService>>,
    Path(module_id): Path<i32>,
    AppJson(dto): AppJson<ModuleImportDto>,
) -> Result<Json<ApiResponse<()>>> {
    service
        .import(module_id, &dto.content, &dto.version, &user)
        .await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Categories imported".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::features::categories::repositories::CategoryRepository;
    use crate::features::categories::routes;
    use crate::features::categories::services::{CategoryPortabilityService, CategoryService};
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
    async fn test_export_then_import_over_http() {
        let (server, repository) = server();
        let root = repository.seed(1, "Root", None, None).await;
        repository.seed(1, "Child", None, Some(root.id)).await;

        let export: Value = server.get("/api/modules/1/categories/export").await.json();
        let content = export["data"]["content"].as_str().unwrap().to_string();

        server
            .post("/api/modules/2/categories/import")
            .json(&json!({"content": content, "version": export["data"]["version"]}))
            .await
            .assert_status_ok();

        let imported = repository.list_by_module(2).await.unwrap();
        assert_eq!(imported.len(), 2);
        let new_root = imported.iter().find(|c| c.name == "Root").unwrap();
        let new_child = imported.iter().find(|c| c.name == "Child").unwrap();
        assert_eq!(new_child.parent_id, Some(new_root.id));
        assert_eq!(new_child.created_by, TEST_AUDIT_USER);
    }

    #[tokio::test]
    async fn test_import_malformed_content_is_bad_request() {
        let (server, repository) = server();

        let response = server
            .post("/api/modules/1/categories/import")
            .json(&json!({"content": "{not json", "version": "1.0.0"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(repository.create_calls().await, 0);
    }

    #[tokio::test]
    async fn test_import_without_content_is_noop() {
        let (server, repository) = server();

        server
            .post("/api/modules/1/categories/import")
            .json(&json!({}))
            .await
            .assert_status_ok();

        assert_eq!(repository.create_calls().await, 0);
    }
}
