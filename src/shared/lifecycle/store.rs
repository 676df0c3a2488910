use async_trait::async_trait;
use uuid::Uuid;

use super::{Resource, Scope};
use crate::core::error::{AppError, Result};

/// Columns whose values must be unique among active rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Name,
    Slug,
}

impl UniqueField {
    pub fn column(self) -> &'static str {
        match self {
            UniqueField::Name => "name",
            UniqueField::Slug => "slug",
        }
    }
}

/// Validated name plus the slug derived from it, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDraft {
    pub name: String,
    pub slug: String,
}

/// Persistence contract for a slugged, soft-deletable resource.
///
/// Each call is a single store round trip and touches at most one row.
/// Implementations must reject a write that would leave two active rows
/// sharing a name or slug with the same `Conflict` the lifecycle pre-check
/// produces (see [`name_taken`] and [`slug_taken`]).
#[async_trait]
pub trait ResourceStore<R: Resource>: Send + Sync {
    /// Insert a new active row
    async fn insert(&self, draft: &ResourceDraft) -> Result<R>;

    async fn find(&self, id: Uuid, scope: Scope) -> Result<Option<R>>;

    async fn list(&self, scope: Scope) -> Result<Vec<R>>;

    /// Overwrite name and slug of an active row. `None` if no active row matched.
    async fn update(&self, id: Uuid, draft: &ResourceDraft) -> Result<Option<R>>;

    /// Stamp `deleted_at` on an active row. `false` if no active row matched.
    async fn soft_delete(&self, id: Uuid) -> Result<bool>;

    /// Clear `deleted_at` on a trashed row. `None` if no trashed row matched.
    async fn restore(&self, id: Uuid) -> Result<Option<R>>;

    /// Remove the row in any state. `false` if nothing was removed.
    async fn purge(&self, id: Uuid) -> Result<bool>;

    /// True when no row inside `scope` (other than `exclude`) holds `value` in `field`
    async fn is_unique(
        &self,
        field: UniqueField,
        value: &str,
        scope: Scope,
        exclude: Option<Uuid>,
    ) -> Result<bool>;
}

pub fn not_found<R: Resource>() -> AppError {
    AppError::NotFound(format!("{} not found", R::LABEL))
}

pub fn name_taken<R: Resource>() -> AppError {
    AppError::conflict(
        format!("{} already exists", R::LABEL),
        "name",
        "The name has already been taken",
    )
}

pub fn slug_taken<R: Resource>(slug: &str) -> AppError {
    AppError::conflict(
        format!("{} already exists", R::LABEL),
        "name",
        format!("The name resolves to slug '{}', which is already taken", slug),
    )
}
