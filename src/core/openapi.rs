use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::health::{handlers as health_handlers, ReadinessDto};
use crate::features::my_modules::{dtos as my_modules_dtos, handlers as my_modules_handlers};
use crate::shared::portability::{ModuleExportDto, ModuleImportDto};
use crate::shared::search::SearchContentDto;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health_handlers::health_check,
        health_handlers::readiness_check,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::list_children,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        categories_handlers::category_search_content,
        categories_handlers::export_categories,
        categories_handlers::import_categories,
        // My modules
        my_modules_handlers::list_my_modules,
        my_modules_handlers::get_my_module,
        my_modules_handlers::create_my_module,
        my_modules_handlers::update_my_module,
        my_modules_handlers::delete_my_module,
        my_modules_handlers::my_module_search_content,
        my_modules_handlers::export_my_modules,
        my_modules_handlers::import_my_modules,
    ),
    components(
        schemas(
            // Shared
            Meta,
            ModuleExportDto,
            ModuleImportDto,
            SearchContentDto,
            ApiResponse<ModuleExportDto>,
            ApiResponse<Vec<SearchContentDto>>,
            // Health
            ReadinessDto,
            ApiResponse<ReadinessDto>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            categories_dtos::CategoryTransferDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // My modules
            my_modules_dtos::CreateMyModuleDto,
            my_modules_dtos::UpdateMyModuleDto,
            my_modules_dtos::MyModuleResponseDto,
            my_modules_dtos::MyModuleTransferDto,
            ApiResponse<my_modules_dtos::MyModuleResponseDto>,
            ApiResponse<Vec<my_modules_dtos::MyModuleResponseDto>>,
        )
    ),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "categories", description = "Hierarchical categories of a module, with export and import"),
        (name = "my-modules", description = "Named module records, with export and import"),
    ),
    info(
        title = "FileHub API",
        version = "0.1.0",
        description = "API documentation for FileHub",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_portability_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/modules/{module_id}/categories/export"));
        assert!(paths.contains_key("/api/modules/{module_id}/categories/import"));
        assert!(paths.contains_key("/api/modules/{module_id}/my-modules/import"));
    }

    #[test]
    fn test_swagger_info_modifier_overrides_info() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "Custom docs".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
