mod category_service;
mod portability_service;

pub use category_service::CategoryService;
pub use portability_service::CategoryPortabilityService;
