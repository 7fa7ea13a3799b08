use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::categories::models::{Category, CategoryDraft};
use crate::shared::query::{Criteria, ListPlan};

#[cfg(test)]
mod memory;
mod postgres;

#[cfg(test)]
pub use memory::InMemoryCategoryRepository;
pub use postgres::PgCategoryRepository;

/// Persistence capability the category service is built on
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Number of categories matching `criteria`
    async fn count(&self, criteria: &Criteria) -> Result<i64>;

    async fn find(&self, plan: &ListPlan) -> Result<Vec<Category>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>>;

    async fn create(&self, draft: CategoryDraft) -> Result<Category>;

    /// Returns the post-update state, or `None` when `id` does not exist
    async fn find_by_id_and_update(&self, id: Uuid, draft: CategoryDraft)
        -> Result<Option<Category>>;

    /// Returns the removed category, or `None` when `id` does not exist
    async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<Category>>;
}
