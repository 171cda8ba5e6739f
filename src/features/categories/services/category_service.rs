use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::{Category, CreateCategory};
use crate::features::categories::repositories::CategoryRepository;
use crate::shared::constants::ENTITY_CATEGORY;
use crate::shared::search::SearchContentDto;
use crate::shared::types::AuditUser;

/// Service for category operations within a module
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// List all categories of a module (flat list)
    pub async fn list(&self, module_id: i32) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.repository.list_by_module(module_id).await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// List all categories of a module as tree structure
    pub async fn list_tree(&self, module_id: i32) -> Result<Vec<CategoryTreeDto>> {
        let categories = self.repository.list_by_module(module_id).await?;
        Ok(CategoryTreeDto::build_tree(categories))
    }

    /// List direct children of a category, or the roots when `parent_id` is `None`
    pub async fn list_by_parent(
        &self,
        module_id: i32,
        parent_id: Option<i32>,
    ) -> Result<Vec<CategoryResponseDto>> {
        if let Some(parent_id) = parent_id {
            self.find_in_module(module_id, parent_id).await?;
        }

        let categories = self.repository.list_by_parent(module_id, parent_id).await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Get category by id
    pub async fn get(&self, module_id: i32, id: i32) -> Result<CategoryResponseDto> {
        Ok(self.find_in_module(module_id, id).await?.into())
    }

    pub async fn create(
        &self,
        module_id: i32,
        dto: &CreateCategoryDto,
        user: &AuditUser,
    ) -> Result<CategoryResponseDto> {
        let data = CreateCategory::from(dto);
        if let Some(parent_id) = data.parent_id {
            self.require_parent(module_id, parent_id).await?;
        }

        let category = self
            .repository
            .create(module_id, &data, user.as_str())
            .await?;

        tracing::info!(
            "Category created: id={}, module_id={}, parent_id={:?}, by={}",
            category.id,
            module_id,
            category.parent_id,
            user.as_str()
        );

        Ok(category.into())
    }

    /// Replace name, description and parent.
    ///
    /// Moving a category below itself or one of its descendants is rejected.
    pub async fn update(
        &self,
        module_id: i32,
        id: i32,
        dto: &UpdateCategoryDto,
        user: &AuditUser,
    ) -> Result<CategoryResponseDto> {
        self.find_in_module(module_id, id).await?;

        let data = CreateCategory::from(dto);
        if let Some(parent_id) = data.parent_id {
            self.require_parent(module_id, parent_id).await?;
            let categories = self.repository.list_by_module(module_id).await?;
            if is_self_or_descendant(&categories, id, parent_id) {
                return Err(AppError::Conflict(format!(
                    "Category {} cannot be moved under itself or one of its descendants",
                    id
                )));
            }
        }

        let category = self
            .repository
            .update(id, &data, user.as_str())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        tracing::info!(
            "Category updated: id={}, module_id={}, parent_id={:?}, by={}",
            id,
            module_id,
            category.parent_id,
            user.as_str()
        );

        Ok(category.into())
    }

    /// Delete a category; its direct children become roots
    pub async fn delete(&self, module_id: i32, id: i32) -> Result<()> {
        self.find_in_module(module_id, id).await?;

        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        tracing::info!("Category deleted: id={}, module_id={}", id, module_id);
        Ok(())
    }

    /// Categories modified at or after `since`, for the host search index
    pub async fn search_contents(
        &self,
        module_id: i32,
        since: DateTime<Utc>,
    ) -> Result<Vec<SearchContentDto>> {
        let categories = self
            .repository
            .list_modified_since(module_id, since)
            .await?;

        Ok(categories.into_iter().map(search_content).collect())
    }

    async fn find_in_module(&self, module_id: i32, id: i32) -> Result<Category> {
        self.repository
            .find(id)
            .await?
            .filter(|c| c.module_id == module_id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Category {} not found in module {}",
                    id, module_id
                ))
            })
    }

    async fn require_parent(&self, module_id: i32, parent_id: i32) -> Result<()> {
        match self.repository.find(parent_id).await? {
            Some(parent) if parent.module_id == module_id => Ok(()),
            _ => Err(AppError::Validation(format!(
                "Parent category {} does not exist in module {}",
                parent_id, module_id
            ))),
        }
    }
}

/// True when `candidate` is `id` or sits anywhere below it.
///
/// Walks up from `candidate`; the visited set stops on corrupt cyclic data.
fn is_self_or_descendant(categories: &[Category], id: i32, candidate: i32) -> bool {
    let parent_of: HashMap<i32, Option<i32>> =
        categories.iter().map(|c| (c.id, c.parent_id)).collect();

    let mut visited = HashSet::new();
    let mut current = Some(candidate);
    while let Some(node) = current {
        if node == id {
            return true;
        }
        if !visited.insert(node) {
            return false;
        }
        current = parent_of.get(&node).copied().flatten();
    }
    false
}

fn search_content(category: Category) -> SearchContentDto {
    let body = category
        .description
        .clone()
        .unwrap_or_else(|| category.name.clone());

    SearchContentDto {
        entity_name: ENTITY_CATEGORY.to_string(),
        entity_id: category.id.to_string(),
        title: category.name,
        body,
        content_modified_by: category.modified_by,
        content_modified_on: category.modified_on,
    }
}
