use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::CategoryRepository;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategoryDraft};
use crate::shared::query::{Criteria, FieldValue, ListPlan};

const COLUMNS: &str = "id, name, slug, created_at, updated_at";

/// Convert database error to more specific AppError with user-friendly messages
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation (PostgreSQL error code 23505)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return AppError::Conflict("A category with this name already exists".to_string());
        }
    }

    AppError::Database(e)
}

fn push_conjunction(builder: &mut QueryBuilder<'_, Postgres>, first: &mut bool) {
    builder.push(if *first { " WHERE " } else { " AND " });
    *first = false;
}

/// Append `WHERE ...` for the filters and keyword search in `criteria`
fn push_criteria(builder: &mut QueryBuilder<'_, Postgres>, criteria: &Criteria) {
    let mut first = true;

    for filter in &criteria.filters {
        push_conjunction(builder, &mut first);
        builder
            .push(filter.field.column)
            .push(" ")
            .push(filter.operator.as_sql())
            .push(" ");
        match &filter.value {
            FieldValue::Uuid(id) => builder.push_bind(*id),
            FieldValue::Text(text) => builder.push_bind(text.clone()),
            FieldValue::Timestamp(ts) => builder.push_bind(*ts),
        };
    }

    if let Some(search) = &criteria.search {
        push_conjunction(builder, &mut first);
        let pattern = search.like_pattern();
        builder.push("(");
        for (i, field) in search.fields.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder
                .push(field.column)
                .push(" ILIKE ")
                .push_bind(pattern.clone());
        }
        builder.push(")");
    }
}

fn push_order_and_page(builder: &mut QueryBuilder<'_, Postgres>, plan: &ListPlan) {
    builder.push(" ORDER BY ");
    for key in &plan.sort {
        builder
            .push(key.field.column)
            .push(" ")
            .push(key.direction.as_sql())
            .push(", ");
    }
    // Stable order across pages
    builder.push("id ASC");

    if let Some(limit) = plan.limit {
        builder.push(" LIMIT ").push_bind(limit);
    }
    if plan.skip > 0 {
        builder.push(" OFFSET ").push_bind(plan.skip);
    }
}

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn count(&self, criteria: &Criteria) -> Result<i64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM categories");
        push_criteria(&mut builder, criteria);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count categories: {:?}", e);
                handle_db_error(e)
            })
    }

    async fn find(&self, plan: &ListPlan) -> Result<Vec<Category>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM categories",
            COLUMNS
        ));
        push_criteria(&mut builder, &plan.criteria);
        push_order_and_page(&mut builder, plan);

        builder
            .build_query_as::<Category>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                handle_db_error(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", COLUMNS);

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by id: {:?}", e);
                handle_db_error(e)
            })
    }

    async fn create(&self, draft: CategoryDraft) -> Result<Category> {
        let query = format!(
            "INSERT INTO categories (name, slug) VALUES ($1, $2) RETURNING {}",
            COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(draft.name)
            .bind(draft.slug)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create category: {:?}", e);
                handle_db_error(e)
            })
    }

    async fn find_by_id_and_update(
        &self,
        id: Uuid,
        draft: CategoryDraft,
    ) -> Result<Option<Category>> {
        let query = format!(
            r#"
            UPDATE categories
            SET name = $1, slug = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING {}
            "#,
            COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(draft.name)
            .bind(draft.slug)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update category: {:?}", e);
                handle_db_error(e)
            })
    }

    async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<Category>> {
        let query = format!("DELETE FROM categories WHERE id = $1 RETURNING {}", COLUMNS);

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category: {:?}", e);
                handle_db_error(e)
            })
    }
}
