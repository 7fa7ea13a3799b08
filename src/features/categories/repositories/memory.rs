use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CategoryRepository;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategoryDraft};
use crate::shared::query::{Criteria, FieldValue, FilterOperator, ListPlan, SortDirection};

/// Vec-backed repository used by handler and service tests
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: RwLock<Vec<Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn field_value(category: &Category, column: &str) -> Option<FieldValue> {
    match column {
        "id" => Some(FieldValue::Uuid(category.id)),
        "name" => Some(FieldValue::Text(category.name.clone())),
        "slug" => Some(FieldValue::Text(category.slug.clone())),
        "created_at" => Some(FieldValue::Timestamp(category.created_at)),
        "updated_at" => Some(FieldValue::Timestamp(category.updated_at)),
        _ => None,
    }
}

fn text_value(category: &Category, column: &str) -> Option<String> {
    match field_value(category, column)? {
        FieldValue::Text(text) => Some(text),
        FieldValue::Uuid(id) => Some(id.to_string()),
        FieldValue::Timestamp(ts) => Some(ts.to_rfc3339()),
    }
}

fn matches_criteria(category: &Category, criteria: &Criteria) -> bool {
    let filters_pass = criteria.filters.iter().all(|filter| {
        let Some(actual) = field_value(category, filter.field.column) else {
            return false;
        };
        let ordering = actual.cmp(&filter.value);
        match filter.operator {
            FilterOperator::Eq => ordering == Ordering::Equal,
            FilterOperator::Gt => ordering == Ordering::Greater,
            FilterOperator::Gte => ordering != Ordering::Less,
            FilterOperator::Lt => ordering == Ordering::Less,
            FilterOperator::Lte => ordering != Ordering::Greater,
        }
    });

    let search_pass = criteria.search.as_ref().is_none_or(|search| {
        let keyword = search.keyword.to_lowercase();
        search.fields.iter().any(|field| {
            text_value(category, field.column)
                .is_some_and(|text| text.to_lowercase().contains(&keyword))
        })
    });

    filters_pass && search_pass
}

fn compare(a: &Category, b: &Category, plan: &ListPlan) -> Ordering {
    for key in &plan.sort {
        let ordering = field_value(a, key.field.column).cmp(&field_value(b, key.field.column));
        let ordering = match key.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.id.cmp(&b.id)
}

fn name_taken(categories: &[Category], name: &str, except: Option<Uuid>) -> bool {
    categories
        .iter()
        .any(|c| c.name == name && Some(c.id) != except)
}

fn conflict() -> AppError {
    AppError::Conflict("A category with this name already exists".to_string())
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn count(&self, criteria: &Criteria) -> Result<i64> {
        let categories = self.categories.read().await;
        Ok(categories.iter().filter(|c| matches_criteria(c, criteria)).count() as i64)
    }

    async fn find(&self, plan: &ListPlan) -> Result<Vec<Category>> {
        let categories = self.categories.read().await;
        let mut found: Vec<Category> = categories
            .iter()
            .filter(|c| matches_criteria(c, &plan.criteria))
            .cloned()
            .collect();
        found.sort_by(|a, b| compare(a, b, plan));

        let skip = usize::try_from(plan.skip).unwrap_or(0);
        let limit = plan
            .limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);
        Ok(found.into_iter().skip(skip).take(limit).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, draft: CategoryDraft) -> Result<Category> {
        let mut categories = self.categories.write().await;
        if name_taken(&categories, &draft.name, None) {
            return Err(conflict());
        }

        let now = Utc::now();
        let category = Category {
            id: Uuid::now_v7(),
            name: draft.name,
            slug: draft.slug,
            created_at: now,
            updated_at: now,
        };
        categories.push(category.clone());
        Ok(category)
    }

    async fn find_by_id_and_update(
        &self,
        id: Uuid,
        draft: CategoryDraft,
    ) -> Result<Option<Category>> {
        let mut categories = self.categories.write().await;
        if !categories.iter().any(|c| c.id == id) {
            return Ok(None);
        }
        if name_taken(&categories, &draft.name, Some(id)) {
            return Err(conflict());
        }

        let Some(category) = categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        category.name = draft.name;
        category.slug = draft.slug;
        category.updated_at = Utc::now();
        Ok(Some(category.clone()))
    }

    async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<Category>> {
        let mut categories = self.categories.write().await;
        let position = categories.iter().position(|c| c.id == id);
        Ok(position.map(|i| categories.remove(i)))
    }
}
