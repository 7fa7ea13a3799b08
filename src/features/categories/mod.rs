//! Product categories.
//!
//! Listing supports pagination, per-field filters, sorting, field
//! projection and keyword search (see [`crate::shared::query`]). Slugs are
//! derived from the name on every write.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/v1/categories` | No | List categories |
//! | GET | `/api/v1/categories/{id}` | No | Get category by id |
//! | POST | `/api/v1/categories` | Yes | Create category |
//! | PUT, POST | `/api/v1/categories/{id}` | Yes | Update category |
//! | DELETE | `/api/v1/categories/{id}` | Yes | Delete category |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{CategoryRepository, PgCategoryRepository};
pub use services::CategoryService;
