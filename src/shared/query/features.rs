use crate::shared::query::pagination::{skip_for, PaginationResult};
use crate::shared::query::params::{FilterCondition, ListQuery, Projection, SortKey};
use crate::shared::query::schema::Field;

/// Case-insensitive substring match of `keyword` over `fields`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchClause {
    pub keyword: String,
    pub fields: Vec<&'static Field>,
}

impl SearchClause {
    /// `%keyword%` with LIKE metacharacters escaped by backslash
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.keyword.len() + 2);
        pattern.push('%');
        for ch in self.keyword.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

/// Which documents match; shared by the count and the page query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub filters: Vec<FilterCondition>,
    pub search: Option<SearchClause>,
}

/// A retrieval plan a repository can execute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPlan {
    pub criteria: Criteria,
    pub sort: Vec<SortKey>,
    pub projection: Projection,
    pub skip: i64,
    /// `None` returns every matching document
    pub limit: Option<i64>,
}

impl ListPlan {
    /// Every document, unordered
    pub fn all() -> Self {
        Self::default()
    }
}

/// Refines a base [`ListPlan`] with the stages a [`ListQuery`] asks for.
///
/// Stages can be chained in any order; each one only touches its own part of
/// the plan. `paginate` takes the collection total, counted before any
/// filtering.
#[derive(Debug)]
pub struct QueryFeatures<'q> {
    plan: ListPlan,
    query: &'q ListQuery,
    pagination_result: Option<PaginationResult>,
}

impl<'q> QueryFeatures<'q> {
    pub fn new(base: ListPlan, query: &'q ListQuery) -> Self {
        Self {
            plan: base,
            query,
            pagination_result: None,
        }
    }

    pub fn filter(mut self) -> Self {
        self.plan
            .criteria
            .filters
            .extend(self.query.filters.iter().cloned());
        self
    }

    pub fn search(mut self) -> Self {
        if let Some(keyword) = &self.query.keyword {
            let fields = self.query.schema.searchable_fields();
            if !fields.is_empty() {
                self.plan.criteria.search = Some(SearchClause {
                    keyword: keyword.clone(),
                    fields,
                });
            }
        }
        self
    }

    pub fn paginate(mut self, total: i64) -> Self {
        self.plan.skip = skip_for(self.query.page, self.query.limit);
        self.plan.limit = Some(self.query.limit);
        self.pagination_result = Some(PaginationResult::new(
            self.query.page,
            self.query.limit,
            total,
        ));
        self
    }

    pub fn sort(mut self) -> Self {
        self.plan.sort = self.query.sort.clone();
        self
    }

    pub fn limit_fields(mut self) -> Self {
        self.plan.projection = self.query.projection.clone();
        self
    }

    pub fn into_parts(self) -> (ListPlan, Option<PaginationResult>) {
        (self.plan, self.pagination_result)
    }
}
