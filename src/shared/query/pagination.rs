use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Page metadata returned with every list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult {
    pub current_page: i64,
    pub limit: i64,
    pub number_of_pages: i64,
    /// Next page number, present only when more documents follow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<i64>,
    /// Previous page number, present only when documents were skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<i64>,
}

impl PaginationResult {
    /// `page` and `limit` must be at least 1
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let skip = skip_for(page, limit);
        let end = page.saturating_mul(limit);

        Self {
            current_page: page,
            limit,
            number_of_pages: page_count(total, limit),
            next: (end < total).then(|| page + 1),
            prev: (skip > 0).then(|| page - 1),
        }
    }
}

/// Documents skipped before `page`
pub fn skip_for(page: i64, limit: i64) -> i64 {
    (page - 1).saturating_mul(limit)
}

fn page_count(total: i64, limit: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    total / limit + i64::from(total % limit != 0)
}
