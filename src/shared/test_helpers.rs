//! In-memory repositories and router helpers for unit and handler tests.

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, response::Response, Router};
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CreateCategory};
use crate::features::categories::repositories::CategoryRepository;
use crate::features::my_modules::models::MyModule;
use crate::features::my_modules::repositories::MyModuleRepository;
use crate::shared::types::AuditUser;

pub const TEST_AUDIT_USER: &str = "test-user";

async fn inject_audit_user_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(AuditUser::new(TEST_AUDIT_USER));
    next.run(request).await
}

/// Attribute every request of `router` to [`TEST_AUDIT_USER`]
pub fn with_audit_user(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_audit_user_middleware))
}

// =============================================================================
// CATEGORIES
// =============================================================================

#[derive(Default)]
struct CategoryState {
    categories: Vec<Category>,
    next_id: i32,
    create_calls: usize,
    created_names: Vec<String>,
    fail_after: Option<usize>,
}

/// Category storage kept in memory; ids start at 1 and never repeat
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    state: Mutex<CategoryState>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a category directly, bypassing create bookkeeping
    pub async fn seed(
        &self,
        module_id: i32,
        name: &str,
        description: Option<&str>,
        parent_id: Option<i32>,
    ) -> Category {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let now = Utc::now();
        let category = Category {
            id: state.next_id,
            module_id,
            parent_id,
            name: name.to_string(),
            description: description.map(str::to_string),
            created_by: "seed".to_string(),
            created_on: now,
            modified_by: "seed".to_string(),
            modified_on: now,
        };
        state.categories.push(category.clone());
        category
    }

    /// Names passed to `create`, in call order
    pub async fn created_names(&self) -> Vec<String> {
        self.state.lock().await.created_names.clone()
    }

    pub async fn create_calls(&self) -> usize {
        self.state.lock().await.create_calls
    }

    /// Make `create` fail once `count` categories have been created
    pub async fn fail_after_creates(&self, count: usize) {
        self.state.lock().await.fail_after = Some(count);
    }
}

fn sorted_by_name(mut categories: Vec<Category>) -> Vec<Category> {
    categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    categories
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, module_id: i32, data: &CreateCategory, actor: &str) -> Result<Category> {
        let mut state = self.state.lock().await;
        state.create_calls += 1;
        if state
            .fail_after
            .is_some_and(|limit| state.created_names.len() >= limit)
        {
            return Err(AppError::Internal("storage unavailable".to_string()));
        }

        state.next_id += 1;
        let now = Utc::now();
        let category = Category {
            id: state.next_id,
            module_id,
            parent_id: data.parent_id,
            name: data.name.clone(),
            description: data.description.clone(),
            created_by: actor.to_string(),
            created_on: now,
            modified_by: actor.to_string(),
            modified_on: now,
        };
        state.created_names.push(category.name.clone());
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn list_by_module(&self, module_id: i32) -> Result<Vec<Category>> {
        let state = self.state.lock().await;
        Ok(sorted_by_name(
            state
                .categories
                .iter()
                .filter(|c| c.module_id == module_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_parent(
        &self,
        module_id: i32,
        parent_id: Option<i32>,
    ) -> Result<Vec<Category>> {
        let state = self.state.lock().await;
        Ok(sorted_by_name(
            state
                .categories
                .iter()
                .filter(|c| c.module_id == module_id && c.parent_id == parent_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find(&self, id: i32) -> Result<Option<Category>> {
        let state = self.state.lock().await;
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn update(
        &self,
        id: i32,
        data: &CreateCategory,
        actor: &str,
    ) -> Result<Option<Category>> {
        let mut state = self.state.lock().await;
        let Some(category) = state.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        category.name = data.name.clone();
        category.description = data.description.clone();
        category.parent_id = data.parent_id;
        category.modified_by = actor.to_string();
        category.modified_on = Utc::now();
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let mut state = self.state.lock().await;
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        if state.categories.len() == before {
            return Ok(false);
        }
        for child in state
            .categories
            .iter_mut()
            .filter(|c| c.parent_id == Some(id))
        {
            child.parent_id = None;
        }
        Ok(true)
    }

    async fn list_modified_since(
        &self,
        module_id: i32,
        since: DateTime<Utc>,
    ) -> Result<Vec<Category>> {
        let state = self.state.lock().await;
        let mut categories: Vec<Category> = state
            .categories
            .iter()
            .filter(|c| c.module_id == module_id && c.modified_on >= since)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.modified_on.cmp(&b.modified_on).then(a.id.cmp(&b.id)));
        Ok(categories)
    }
}

// =============================================================================
// MY MODULES
// =============================================================================

#[derive(Default)]
struct MyModuleState {
    records: Vec<MyModule>,
    next_id: i32,
}

#[derive(Default)]
pub struct InMemoryMyModuleRepository {
    state: Mutex<MyModuleState>,
}

impl InMemoryMyModuleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, module_id: i32, name: &str) -> MyModule {
        // Seeding goes through create with a fixed actor
        match self.create(module_id, name, "seed").await {
            Ok(record) => record,
            Err(e) => panic!("seeding failed: {}", e),
        }
    }

    fn module_records(state: &MyModuleState, module_id: i32) -> Vec<MyModule> {
        state
            .records
            .iter()
            .filter(|m| m.module_id == module_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MyModuleRepository for InMemoryMyModuleRepository {
    async fn create(&self, module_id: i32, name: &str, actor: &str) -> Result<MyModule> {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let now = Utc::now();
        let record = MyModule {
            id: state.next_id,
            module_id,
            name: name.to_string(),
            created_by: actor.to_string(),
            created_on: now,
            modified_by: actor.to_string(),
            modified_on: now,
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn list_page(
        &self,
        module_id: i32,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<MyModule>, i64)> {
        let state = self.state.lock().await;
        let records = Self::module_records(&state, module_id);
        let total = records.len() as i64;
        let page = records
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn list_by_module(&self, module_id: i32) -> Result<Vec<MyModule>> {
        let state = self.state.lock().await;
        Ok(Self::module_records(&state, module_id))
    }

    async fn find(&self, id: i32) -> Result<Option<MyModule>> {
        let state = self.state.lock().await;
        Ok(state.records.iter().find(|m| m.id == id).cloned())
    }

    async fn update_name(&self, id: i32, name: &str, actor: &str) -> Result<Option<MyModule>> {
        let mut state = self.state.lock().await;
        let Some(record) = state.records.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        record.name = name.to_string();
        record.modified_by = actor.to_string();
        record.modified_on = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let mut state = self.state.lock().await;
        let before = state.records.len();
        state.records.retain(|m| m.id != id);
        Ok(state.records.len() != before)
    }

    async fn list_modified_since(
        &self,
        module_id: i32,
        since: DateTime<Utc>,
    ) -> Result<Vec<MyModule>> {
        let state = self.state.lock().await;
        Ok(Self::module_records(&state, module_id)
            .into_iter()
            .filter(|m| m.modified_on >= since)
            .collect())
    }
}
