use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryTransferDto;
use crate::features::categories::remap::{split_roots, ChildQueue, IdRemapper, Placement};
use crate::features::categories::repositories::CategoryRepository;
use crate::shared::portability::{
    decode_payload, encode_payload, ModuleExportDto, PAYLOAD_VERSION,
};
use crate::shared::types::AuditUser;

/// Export and import of a module's category forest
pub struct CategoryPortabilityService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryPortabilityService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// Serialize every category of `module_id`. Read-only.
    pub async fn export(&self, module_id: i32) -> Result<ModuleExportDto> {
        let categories = self.repository.list_by_module(module_id).await?;
        let count = categories.len();

        let records: Vec<CategoryTransferDto> =
            categories.into_iter().map(CategoryTransferDto::from).collect();
        let content = encode_payload(&records)?;

        tracing::info!("Categories exported: module_id={}, count={}", module_id, count);

        Ok(ModuleExportDto {
            module_id,
            version: PAYLOAD_VERSION.to_string(),
            content,
        })
    }

    /// Recreate an exported category forest under `module_id`.
    ///
    /// The payload is decoded and validated before anything is written.
    /// Roots are created first, then children as their parents become
    /// known. Storage errors abort the import; categories created before
    /// the failure are kept.
    pub async fn import(
        &self,
        module_id: i32,
        content: &str,
        version: &str,
        user: &AuditUser,
    ) -> Result<()> {
        let records: Vec<CategoryTransferDto> = decode_payload(content)?;
        for record in &records {
            record.validate().map_err(|e| {
                AppError::MalformedPayload(format!("category {}: {}", record.id, e))
            })?;
        }

        if records.is_empty() {
            tracing::info!(
                "Category import skipped: module_id={}, version={}, empty payload",
                module_id,
                version
            );
            return Ok(());
        }

        let total = records.len();
        let (roots, children) = split_roots(records);
        let mut remapper = IdRemapper::new();

        for root in &roots {
            let created = self
                .repository
                .create(module_id, &root.to_create(None), user.as_str())
                .await?;
            remapper.record(root.id, created.id);
        }

        let mut queue = ChildQueue::new(children, &remapper);
        let mut demoted = 0usize;
        while let Some((record, placement)) = queue.next(&remapper) {
            let parent_id = match placement {
                Placement::Under(new_parent_id) => Some(new_parent_id),
                Placement::Demoted { missing_parent_id } => {
                    tracing::warn!(
                        "Category import: parent {} of category {} ({:?}) not found, importing as root",
                        missing_parent_id,
                        record.id,
                        record.name
                    );
                    demoted += 1;
                    None
                }
            };

            let created = self
                .repository
                .create(module_id, &record.to_create(parent_id), user.as_str())
                .await?;
            remapper.record(record.id, created.id);
        }

        tracing::info!(
            "Categories imported: module_id={}, version={}, count={}, roots={}, demoted={}",
            module_id,
            version,
            total,
            roots.len(),
            demoted
        );

        Ok(())
    }
}
