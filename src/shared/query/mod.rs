//! Generic list-query pipeline: pagination, filtering, sorting, field
//! projection and keyword search over any resource that describes itself
//! with a [`schema::ResourceSchema`].

pub mod features;
pub mod pagination;
pub mod params;
pub mod schema;

pub use features::{Criteria, ListPlan, QueryFeatures, SearchClause};
pub use pagination::PaginationResult;
pub use params::{FieldValue, FilterOperator, ListQuery, Projection, SortDirection};
pub use schema::{Field, FieldKind, ResourceSchema};
