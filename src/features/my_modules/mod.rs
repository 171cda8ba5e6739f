//! Named records owned by a module, with export and import.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{MyModuleRepository, PgMyModuleRepository};
pub use services::MyModuleService;
