//! Hierarchical categories owned by a module.
//!
//! Categories form a forest: a category without `parent_id` is a root.
//! The portability endpoints move a whole forest between modules, rebuilding
//! parent links with the ids assigned in the target module.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/modules/{module_id}/categories` | List (flat or `?tree=true`) |
//! | POST | `/api/modules/{module_id}/categories` | Create |
//! | GET | `/api/modules/{module_id}/categories/children` | Direct children of `?parent_id=` |
//! | GET/PUT/DELETE | `/api/modules/{module_id}/categories/{id}` | Get, update, delete |
//! | GET | `/api/modules/{module_id}/categories/export` | Export the forest |
//! | POST | `/api/modules/{module_id}/categories/import` | Import an export |
//! | GET | `/api/modules/{module_id}/categories/search-content` | Search index entries |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod remap;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{CategoryRepository, PgCategoryRepository};
pub use services::{CategoryPortabilityService, CategoryService};
