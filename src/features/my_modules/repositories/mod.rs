mod my_module_repository;

pub use my_module_repository::{MyModuleRepository, PgMyModuleRepository};
