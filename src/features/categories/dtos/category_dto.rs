use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::categories::models::Category;
use crate::shared::lifecycle::{ResourceInput, Scope};

/// Request body for creating or renaming a category
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CategoryRequestDto {
    /// Display name, at least 2 characters. The slug is derived from it.
    #[serde(default, deserialize_with = "crate::shared::validation::null_as_empty")]
    #[schema(example = "Tech News", min_length = 2, max_length = 255)]
    pub name: String,
}

impl From<CategoryRequestDto> for ResourceInput {
    fn from(dto: CategoryRequestDto) -> Self {
        ResourceInput::new(dto.name)
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set while the category is in the trash
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            created_at: c.created_at,
            updated_at: c.updated_at,
            deleted_at: c.deleted_at,
        }
    }
}

/// Query params for listing categories
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCategoriesQuery {
    /// `active` (default), `trashed` or `all`
    #[serde(default)]
    #[param(value_type = Option<Scope>)]
    pub scope: Scope,
}
