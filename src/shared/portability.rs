//! Module portability envelope shared by every exportable feature.
//!
//! An export is a JSON array of records carried as a string, so the host can
//! move it between sites without knowing its shape.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};

/// Format version stamped on exports
pub const PAYLOAD_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Response DTO for a module export
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModuleExportDto {
    pub module_id: i32,
    pub version: String,
    /// JSON array of exported records
    pub content: String,
}

/// Request DTO for a module import
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModuleImportDto {
    /// Content of a previous export; empty imports nothing
    #[serde(default)]
    pub content: String,

    /// Version of the exporting module (informational)
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    PAYLOAD_VERSION.to_string()
}

pub fn encode_payload<T: Serialize>(records: &[T]) -> Result<String> {
    serde_json::to_string(records)
        .map_err(|e| AppError::Internal(format!("Failed to serialize export: {}", e)))
}

/// Decode export content.
///
/// Blank content and a JSON `null` are an empty collection; anything else
/// that is not an array of records fails as a whole.
pub fn decode_payload<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let records: Option<Vec<T>> =
        serde_json::from_str(trimmed).map_err(|e| AppError::MalformedPayload(e.to_string()))?;

    Ok(records.unwrap_or_default())
}
