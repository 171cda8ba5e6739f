use std::sync::Arc;

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::my_modules::dtos::{
    CreateMyModuleDto, MyModuleResponseDto, MyModuleTransferDto, UpdateMyModuleDto,
};
use crate::features::my_modules::models::MyModule;
use crate::features::my_modules::repositories::MyModuleRepository;
use crate::shared::constants::ENTITY_MY_MODULE;
use crate::shared::portability::{
    decode_payload, encode_payload, ModuleExportDto, PAYLOAD_VERSION,
};
use crate::shared::search::SearchContentDto;
use crate::shared::types::{AuditUser, PaginationQuery};

/// Service for the named records of a module, including their portability
pub struct MyModuleService {
    repository: Arc<dyn MyModuleRepository>,
}

impl MyModuleService {
    pub fn new(repository: Arc<dyn MyModuleRepository>) -> Self {
        Self { repository }
    }

    /// One page of records plus the module total
    pub async fn list(
        &self,
        module_id: i32,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<MyModuleResponseDto>, i64)> {
        let (records, total) = self
            .repository
            .list_page(module_id, pagination.limit(), pagination.offset())
            .await?;

        Ok((records.into_iter().map(|m| m.into()).collect(), total))
    }

    pub async fn get(&self, module_id: i32, id: i32) -> Result<MyModuleResponseDto> {
        Ok(self.find_in_module(module_id, id).await?.into())
    }

    pub async fn create(
        &self,
        module_id: i32,
        dto: &CreateMyModuleDto,
        user: &AuditUser,
    ) -> Result<MyModuleResponseDto> {
        let record = self
            .repository
            .create(module_id, dto.name.trim(), user.as_str())
            .await?;

        tracing::info!(
            "MyModule created: id={}, module_id={}, by={}",
            record.id,
            module_id,
            user.as_str()
        );

        Ok(record.into())
    }

    pub async fn update(
        &self,
        module_id: i32,
        id: i32,
        dto: &UpdateMyModuleDto,
        user: &AuditUser,
    ) -> Result<MyModuleResponseDto> {
        self.find_in_module(module_id, id).await?;

        let record = self
            .repository
            .update_name(id, dto.name.trim(), user.as_str())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("MyModule {} not found", id)))?;

        tracing::info!(
            "MyModule updated: id={}, module_id={}, by={}",
            id,
            module_id,
            user.as_str()
        );

        Ok(record.into())
    }

    pub async fn delete(&self, module_id: i32, id: i32) -> Result<()> {
        self.find_in_module(module_id, id).await?;

        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!("MyModule {} not found", id)));
        }

        tracing::info!("MyModule deleted: id={}, module_id={}", id, module_id);
        Ok(())
    }

    /// Records modified at or after `since`, for the host search index
    pub async fn search_contents(
        &self,
        module_id: i32,
        since: DateTime<Utc>,
    ) -> Result<Vec<SearchContentDto>> {
        let records = self
            .repository
            .list_modified_since(module_id, since)
            .await?;

        Ok(records.into_iter().map(search_content).collect())
    }

    /// Serialize every record of `module_id`. Read-only.
    pub async fn export(&self, module_id: i32) -> Result<ModuleExportDto> {
        let records: Vec<MyModuleTransferDto> = self
            .repository
            .list_by_module(module_id)
            .await?
            .into_iter()
            .map(MyModuleTransferDto::from)
            .collect();
        let content = encode_payload(&records)?;

        tracing::info!(
            "MyModules exported: module_id={}, count={}",
            module_id,
            records.len()
        );

        Ok(ModuleExportDto {
            module_id,
            version: PAYLOAD_VERSION.to_string(),
            content,
        })
    }

    /// Create a copy of every exported record under `module_id`.
    ///
    /// Only the name is carried over. The whole payload is validated before
    /// the first write.
    pub async fn import(
        &self,
        module_id: i32,
        content: &str,
        version: &str,
        user: &AuditUser,
    ) -> Result<()> {
        let records: Vec<MyModuleTransferDto> = decode_payload(content)?;
        for record in &records {
            record.validate().map_err(|e| {
                AppError::MalformedPayload(format!("record {}: {}", record.id, e))
            })?;
        }

        for record in &records {
            self.repository
                .create(module_id, record.name.trim(), user.as_str())
                .await?;
        }

        tracing::info!(
            "MyModules imported: module_id={}, version={}, count={}",
            module_id,
            version,
            records.len()
        );

        Ok(())
    }

    async fn find_in_module(&self, module_id: i32, id: i32) -> Result<MyModule> {
        self.repository
            .find(id)
            .await?
            .filter(|m| m.module_id == module_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("MyModule {} not found in module {}", id, module_id))
            })
    }
}

fn search_content(record: MyModule) -> SearchContentDto {
    SearchContentDto {
        entity_name: ENTITY_MY_MODULE.to_string(),
        entity_id: record.id.to_string(),
        title: record.name.clone(),
        body: record.name,
        content_modified_by: record.modified_by,
        content_modified_on: record.modified_on,
    }
}
