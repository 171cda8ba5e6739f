use std::sync::Arc;

use axum::{routing::get, routing::post, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::{CategoryPortabilityService, CategoryService};

/// Create routes for the categories feature
///
/// Static segments (`children`, `export`, `import`, `search-content`) take
/// precedence over the `{id}` segment.
pub fn routes(
    category_service: Arc<CategoryService>,
    portability_service: Arc<CategoryPortabilityService>,
) -> Router {
    let category_routes = Router::new()
        .route(
            "/api/modules/{module_id}/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/api/modules/{module_id}/categories/children",
            get(handlers::list_children),
        )
        .route(
            "/api/modules/{module_id}/categories/search-content",
            get(handlers::category_search_content),
        )
        .route(
            "/api/modules/{module_id}/categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(category_service);

    let portability_routes = Router::new()
        .route(
            "/api/modules/{module_id}/categories/export",
            get(handlers::export_categories),
        )
        .route(
            "/api/modules/{module_id}/categories/import",
            post(handlers::import_categories),
        )
        .with_state(portability_service);

    category_routes.merge(portability_routes)
}
