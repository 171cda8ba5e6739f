/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Nesting levels rendered by the category tree listing
pub const MAX_CATEGORY_TREE_DEPTH: usize = 32;

// =============================================================================
// AUDIT CONSTANTS
// =============================================================================

/// Header carrying the acting user name, set by the host site
pub const AUDIT_USER_HEADER: &str = "x-user-name";

/// User recorded when no acting user is known
pub const DEFAULT_AUDIT_USER: &str = "system";

/// Width of the `created_by` / `modified_by` columns
pub const MAX_AUDIT_USER_LENGTH: usize = 256;

// =============================================================================
// SEARCH ENTITY NAMES
// =============================================================================

pub const ENTITY_CATEGORY: &str = "Category";
pub const ENTITY_MY_MODULE: &str = "MyModule";
