use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::categories::dtos::{CategoryRequestDto, CategoryResponseDto};
use crate::features::categories::models::Category;
use crate::features::categories::stores::PgCategoryStore;
use crate::shared::lifecycle::{ResourceLifecycle, ResourceStore, Scope};

/// Service for category operations
pub struct CategoryService {
    lifecycle: ResourceLifecycle<Category>,
}

impl std::fmt::Debug for CategoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryService").finish_non_exhaustive()
    }
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self::with_store(Arc::new(PgCategoryStore::new(pool)))
    }

    pub fn with_store(store: Arc<dyn ResourceStore<Category>>) -> Self {
        Self {
            lifecycle: ResourceLifecycle::new(store),
        }
    }

    pub async fn create(&self, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let category = self.lifecycle.create(dto.into()).await?;
        Ok(category.into())
    }

    pub async fn list(&self, scope: Scope) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.lifecycle.list(scope).await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Get an active category by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let category = self.lifecycle.find(id).await?;
        Ok(category.into())
    }

    pub async fn update(&self, id: Uuid, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let category = self.lifecycle.update(id, dto.into()).await?;
        Ok(category.into())
    }

    /// Move to trash (soft delete)
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.lifecycle.soft_delete(id).await
    }

    pub async fn restore(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let category = self.lifecycle.restore(id).await?;
        Ok(category.into())
    }

    /// Remove for good, active or trashed
    pub async fn delete_permanent(&self, id: Uuid) -> Result<()> {
        self.lifecycle.purge(id).await
    }
}
