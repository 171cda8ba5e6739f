use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::categories::models::{Category, CreateCategory};
use crate::shared::constants::MAX_CATEGORY_TREE_DEPTH;

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[serde(deserialize_with = "crate::shared::validation::trimmed_string")]
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub name: String,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,

    /// Parent category in the same module; omit for a root category
    pub parent_id: Option<i32>,
}

/// Request DTO for replacing a category's editable fields
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[serde(deserialize_with = "crate::shared::validation::trimmed_string")]
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub name: String,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,

    /// New parent; `null` moves the category to the root level
    pub parent_id: Option<i32>,
}

fn normalize(name: &str, description: Option<&str>, parent_id: Option<i32>) -> CreateCategory {
    CreateCategory {
        name: name.trim().to_string(),
        description: description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        parent_id,
    }
}

impl From<&CreateCategoryDto> for CreateCategory {
    fn from(dto: &CreateCategoryDto) -> Self {
        normalize(&dto.name, dto.description.as_deref(), dto.parent_id)
    }
}

impl From<&UpdateCategoryDto> for CreateCategory {
    fn from(dto: &UpdateCategoryDto) -> Self {
        normalize(&dto.name, dto.description.as_deref(), dto.parent_id)
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i32,
    pub module_id: i32,
    pub parent_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub created_by: String,
    pub created_on: DateTime<Utc>,
    pub modified_by: String,
    pub modified_on: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            module_id: c.module_id,
            parent_id: c.parent_id,
            name: c.name,
            description: c.description,
            created_by: c.created_by,
            created_on: c.created_on,
            modified_by: c.modified_by,
            modified_on: c.modified_on,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Build tree from flat list of categories.
    ///
    /// Sibling order follows the input order. Categories whose parent is not
    /// in the list are not reachable from a root and are left out. Nesting
    /// stops at [`MAX_CATEGORY_TREE_DEPTH`]: deeper descendants are listed,
    /// in depth-first order, as children of their ancestor at that depth.
    pub fn build_tree(categories: Vec<Category>) -> Vec<CategoryTreeDto> {
        let mut children_of: HashMap<Option<i32>, Vec<usize>> = HashMap::new();
        for (index, category) in categories.iter().enumerate() {
            children_of.entry(category.parent_id).or_default().push(index);
        }

        // Pre-order walk: (category index, depth, index of the output parent)
        let mut order: Vec<(usize, Option<usize>)> = Vec::with_capacity(categories.len());
        let mut stack: Vec<(usize, usize, Option<usize>)> = children_of
            .get(&None)
            .map(|roots| roots.iter().rev().map(|&root| (root, 1, None)).collect())
            .unwrap_or_default();

        while let Some((index, depth, output_parent)) = stack.pop() {
            order.push((index, output_parent));

            let (child_depth, child_parent) = if depth <= MAX_CATEGORY_TREE_DEPTH {
                (depth + 1, index)
            } else {
                // Below the cap: attach to the same ancestor as this node
                (depth, output_parent.unwrap_or(index))
            };

            if let Some(children) = children_of.get(&Some(categories[index].id)) {
                stack.extend(
                    children
                        .iter()
                        .rev()
                        .map(|&child| (child, child_depth, Some(child_parent))),
                );
            }
        }

        // Assemble bottom-up: every node comes after its output parent in
        // `order`, so walking it backwards finishes children first.
        let mut nodes: Vec<Option<CategoryTreeDto>> = categories
            .iter()
            .map(|c| {
                Some(CategoryTreeDto {
                    id: c.id,
                    name: c.name.clone(),
                    description: c.description.clone(),
                    children: Vec::new(),
                })
            })
            .collect();

        let mut roots = Vec::new();
        for &(index, output_parent) in order.iter().rev() {
            let Some(mut node) = nodes[index].take() else {
                continue;
            };
            node.children.reverse();
            match output_parent.and_then(|parent| nodes[parent].as_mut()) {
                Some(parent) => parent.children.push(node),
                None => roots.push(node),
            }
        }
        roots.reverse();
        roots
    }

    /// Levels of nesting below and including this node
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }
}

/// Query params for listing categories
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCategoriesQuery {
    /// If true, return tree structure. Default: false (flat list)
    #[serde(default)]
    pub tree: bool,
}

/// Query params for listing the direct children of a category
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListChildrenQuery {
    /// Parent category; omit to list root categories
    pub parent_id: Option<i32>,
}
