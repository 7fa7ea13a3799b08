use std::sync::Arc;

use uuid::Uuid;

use crate::core::config::PaginationConfig;
use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::{CategoryDraft, CATEGORY_SCHEMA};
use crate::features::categories::repositories::CategoryRepository;
use crate::shared::query::{Criteria, ListPlan, ListQuery, PaginationResult, QueryFeatures};

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("No Category found by this id: {}", id))
}

/// Service for category operations
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
    pagination: PaginationConfig,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>, pagination: PaginationConfig) -> Self {
        Self {
            repository,
            pagination,
        }
    }

    /// List categories for a raw query string.
    ///
    /// Items come back already projected, so they are plain JSON objects.
    pub async fn list(
        &self,
        params: Vec<(String, String)>,
    ) -> Result<(Vec<serde_json::Value>, Option<PaginationResult>)> {
        let query = ListQuery::parse(&CATEGORY_SCHEMA, params, &self.pagination)?;

        // Pagination metadata describes the whole collection, not the filtered set
        let total = self.repository.count(&Criteria::default()).await?;

        let (plan, pagination_result) = QueryFeatures::new(ListPlan::all(), &query)
            .paginate(total)
            .filter()
            .sort()
            .limit_fields()
            .search()
            .into_parts();

        let categories = self.repository.find(&plan).await?;

        let mut items = Vec::with_capacity(categories.len());
        for category in categories {
            let value = serde_json::to_value(CategoryResponseDto::from(category)).map_err(|e| {
                tracing::error!("Failed to serialize category: {:?}", e);
                AppError::Internal(e.to_string())
            })?;
            items.push(plan.projection.apply(value));
        }

        Ok((items, pagination_result))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(CategoryResponseDto::from)
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let draft = CategoryDraft::from_name(&dto.name);
        let category = self.repository.create(draft).await?;

        tracing::info!("Category created: {} ({})", category.slug, category.id);
        Ok(category.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let draft = CategoryDraft::from_name(&dto.name);
        let category = self
            .repository
            .find_by_id_and_update(id, draft)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Category updated: {} ({})", category.slug, category.id);
        Ok(category.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let category = self
            .repository
            .find_by_id_and_delete(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Category deleted: {} ({})", category.slug, category.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::repositories::InMemoryCategoryRepository;

    fn service() -> CategoryService {
        CategoryService::new(
            Arc::new(InMemoryCategoryRepository::new()),
            PaginationConfig::default(),
        )
    }

    fn params(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    async fn seed(service: &CategoryService, names: &[&str]) {
        for name in names {
            service
                .create(CreateCategoryDto {
                    name: name.to_string(),
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_create_derives_slug() {
        let service = service();
        let created = service
            .create(CreateCategoryDto {
                name: "Home Appliances".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(created.slug, "home-appliances");
        assert_eq!(service.get_by_id(created.id).await.unwrap().name, "Home Appliances");
    }

    #[tokio::test]
    async fn test_update_rederives_slug_and_keeps_id() {
        let service = service();
        seed(&service, &["Electronics"]).await;
        let (items, _) = service.list(vec![]).await.unwrap();
        let id: Uuid = serde_json::from_value(items[0]["id"].clone()).unwrap();

        let updated = service
            .update(
                id,
                UpdateCategoryDto {
                    name: "Consumer Electronics".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.slug, "consumer-electronics");
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found_with_id_in_message() {
        let service = service();
        let id = Uuid::now_v7();

        for result in [
            service.get_by_id(id).await.map(|_| ()),
            service
                .update(
                    id,
                    UpdateCategoryDto {
                        name: "Books".to_string(),
                    },
                )
                .await
                .map(|_| ()),
            service.delete(id).await,
        ] {
            match result {
                Err(AppError::NotFound(message)) => {
                    assert_eq!(message, format!("No Category found by this id: {}", id))
                }
                other => panic!("expected not found, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let service = service();
        seed(&service, &["Books"]).await;

        let result = service
            .create(CreateCategoryDto {
                name: "  Books ".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_list_pages_over_unfiltered_total() {
        let service = service();
        seed(&service, &["Smart TVs", "TV Mounts", "Books", "Garden"]).await;

        let (items, pagination) = service
            .list(params(&[("keyword", "tv"), ("limit", "1")]))
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        let pagination = pagination.unwrap();
        assert_eq!(pagination.number_of_pages, 4);
        assert_eq!(pagination.next, Some(2));

        let (items, pagination) = service
            .list(params(&[("name", "Books"), ("limit", "2")]))
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(pagination.unwrap().number_of_pages, 2);
    }

    #[tokio::test]
    async fn test_list_sorts_and_projects() {
        let service = service();
        seed(&service, &["Garden", "Books", "Toys"]).await;

        let (items, _) = service
            .list(params(&[("sort", "name"), ("fields", "name")]))
            .await
            .unwrap();

        let names: Vec<&str> = items.iter().filter_map(|i| i["name"].as_str()).collect();
        assert_eq!(names, vec!["Books", "Garden", "Toys"]);
        for item in &items {
            let keys: Vec<&String> = item.as_object().unwrap().keys().collect();
            assert_eq!(keys.len(), 2);
            assert!(item.get("id").is_some());
        }
    }

    #[tokio::test]
    async fn test_list_rejects_bad_params() {
        let service = service();
        let result = service.list(params(&[("page", "0")])).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
