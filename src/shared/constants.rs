/// Page size used when a list request has no `limit`
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// Largest page size a list request may ask for
pub const MAX_PAGE_LIMIT: i64 = 100;

// =============================================================================
// LIST QUERY PARAMETERS
// =============================================================================

pub const PARAM_PAGE: &str = "page";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_SORT: &str = "sort";
pub const PARAM_FIELDS: &str = "fields";
pub const PARAM_KEYWORD: &str = "keyword";
