use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::query::PaginationResult;

/// Success envelope; absent parts are left out of the JSON body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Number of items in `data` (list responses only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination_result: Option<PaginationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            results: None,
            pagination_result: None,
            data: Some(data),
            message: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn paginated(items: Vec<T>, pagination_result: Option<PaginationResult>) -> Self {
        Self {
            results: Some(items.len()),
            pagination_result,
            data: Some(items),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            results: None,
            pagination_result: None,
            data: None,
            message: Some(message.into()),
        }
    }
}
