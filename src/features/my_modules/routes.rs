use std::sync::Arc;

use axum::{routing::get, routing::post, Router};

use crate::features::my_modules::handlers;
use crate::features::my_modules::services::MyModuleService;

/// Create routes for the my-modules feature
pub fn routes(service: Arc<MyModuleService>) -> Router {
    Router::new()
        .route(
            "/api/modules/{module_id}/my-modules",
            get(handlers::list_my_modules).post(handlers::create_my_module),
        )
        .route(
            "/api/modules/{module_id}/my-modules/search-content",
            get(handlers::my_module_search_content),
        )
        .route(
            "/api/modules/{module_id}/my-modules/export",
            get(handlers::export_my_modules),
        )
        .route(
            "/api/modules/{module_id}/my-modules/import",
            post(handlers::import_my_modules),
        )
        .route(
            "/api/modules/{module_id}/my-modules/{id}",
            get(handlers::get_my_module)
                .put(handlers::update_my_module)
                .delete(handlers::delete_my_module),
        )
        .with_state(service)
}
