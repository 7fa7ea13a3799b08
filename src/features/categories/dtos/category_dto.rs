use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::categories::models::Category;
use crate::shared::validation::CONTROL_CHAR_REGEX;

const NAME_MIN_CHARS: usize = 3;
const NAME_MAX_CHARS: usize = 32;

/// Category names are 3 to 32 characters once surrounding whitespace is
/// removed, with no control characters
fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    if CONTROL_CHAR_REGEX.is_match(name) {
        let mut error = ValidationError::new("control_characters");
        error.message = Some("name must not contain control characters".into());
        return Err(error);
    }

    let len = name.trim().chars().count();
    if (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Ok(());
    }

    let mut error = ValidationError::new("length");
    error.message = Some(
        format!(
            "name must be between {} and {} characters",
            NAME_MIN_CHARS, NAME_MAX_CHARS
        )
        .into(),
    );
    Err(error)
}

// Create request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(custom(function = "validate_category_name"))]
    pub name: String,
}

// Update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(custom(function = "validate_category_name"))]
    pub name: String,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
