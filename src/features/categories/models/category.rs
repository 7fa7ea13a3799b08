use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::query::{Field, FieldKind, ResourceSchema};
use crate::shared::slug::slugify;

/// Database model for category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query surface of `GET /api/v1/categories`
pub static CATEGORY_SCHEMA: ResourceSchema = ResourceSchema {
    fields: &[
        Field {
            name: "id",
            column: "id",
            kind: FieldKind::Uuid,
        },
        Field {
            name: "name",
            column: "name",
            kind: FieldKind::Text,
        },
        Field {
            name: "slug",
            column: "slug",
            kind: FieldKind::Text,
        },
        Field {
            name: "createdAt",
            column: "created_at",
            kind: FieldKind::Timestamp,
        },
        Field {
            name: "updatedAt",
            column: "updated_at",
            kind: FieldKind::Timestamp,
        },
    ],
    searchable: &["name", "slug"],
    default_sort: "-createdAt",
    id_field: "id",
};

/// Name and slug for a create or update; the slug is always derived here
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
}

impl CategoryDraft {
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self {
            name: name.to_string(),
            slug: slugify(name),
        }
    }
}
