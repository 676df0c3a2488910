//! Lifecycle of slugged, soft-deletable resources.
//!
//! ```text
//!           create
//!             |
//!             v
//!        [ Active ] --soft_delete--> [ Trashed ] --purge--> (removed)
//!             ^                          |
//!             +---------restore----------+
//! ```
//!
//! Every resource with a display name and a derived slug goes through the
//! same rules: the name is validated, the slug is derived from it, name and
//! slug are each checked for uniqueness among active rows, and only then is
//! the store touched. Trashed rows release their name and slug.

mod postgres;
mod scope;
mod store;
mod uniqueness;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::shared::slug::slugify;
use crate::shared::validation::validate_resource_name;

pub use postgres::PgResourceStore;
pub use scope::Scope;
pub use store::{name_taken, not_found, slug_taken, ResourceDraft, ResourceStore, UniqueField};

/// A row managed by [`ResourceLifecycle`]
pub trait Resource: Clone + Send + Sync + 'static {
    /// Backing table
    const TABLE: &'static str;
    /// Human readable name used in messages ("Category")
    const LABEL: &'static str;
    /// Column list selected and returned by store queries
    const COLUMNS: &'static str;

    fn id(&self) -> Uuid;
    fn name(&self) -> &str;
    fn slug(&self) -> &str;
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    fn is_trashed(&self) -> bool {
        Scope::Trashed.admits(self.deleted_at())
    }
}

/// Name payload accepted by create and update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ResourceInput {
    #[serde(default, deserialize_with = "crate::shared::validation::null_as_empty")]
    #[validate(custom(function = "validate_resource_name"))]
    pub name: String,
}

impl ResourceInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Validate the name and derive its slug
    pub fn into_draft(self) -> Result<ResourceDraft> {
        self.validate()?;
        let slug = slugify(&self.name);
        Ok(ResourceDraft {
            name: self.name,
            slug,
        })
    }
}

/// Validation, uniqueness and state transitions for one resource type.
///
/// Stateless between calls; all shared state lives in the store.
pub struct ResourceLifecycle<R: Resource> {
    store: Arc<dyn ResourceStore<R>>,
}

impl<R: Resource> ResourceLifecycle<R> {
    pub fn new(store: Arc<dyn ResourceStore<R>>) -> Self {
        Self { store }
    }

    /// Name and slug must both be free among active rows other than `exclude`
    async fn ensure_unique(&self, draft: &ResourceDraft, exclude: Option<Uuid>) -> Result<()> {
        if !self
            .store
            .is_unique(UniqueField::Name, &draft.name, Scope::Active, exclude)
            .await?
        {
            return Err(name_taken::<R>());
        }

        if !self
            .store
            .is_unique(UniqueField::Slug, &draft.slug, Scope::Active, exclude)
            .await?
        {
            return Err(slug_taken::<R>(&draft.slug));
        }

        Ok(())
    }

    pub async fn create(&self, input: ResourceInput) -> Result<R> {
        let draft = input.into_draft()?;
        self.ensure_unique(&draft, None).await?;

        let resource = self.store.insert(&draft).await?;
        tracing::info!(id = %resource.id(), slug = %resource.slug(), "{} created", R::LABEL);

        Ok(resource)
    }

    pub async fn list(&self, scope: Scope) -> Result<Vec<R>> {
        self.store.list(scope).await
    }

    /// Active rows only
    pub async fn find(&self, id: Uuid) -> Result<R> {
        self.store
            .find(id, Scope::Active)
            .await?
            .ok_or_else(not_found::<R>)
    }

    pub async fn update(&self, id: Uuid, input: ResourceInput) -> Result<R> {
        let draft = input.into_draft()?;

        self.find(id).await?;
        self.ensure_unique(&draft, Some(id)).await?;

        // the row may have been trashed since the lookup
        let resource = self
            .store
            .update(id, &draft)
            .await?
            .ok_or_else(not_found::<R>)?;
        tracing::info!(id = %id, slug = %resource.slug(), "{} updated", R::LABEL);

        Ok(resource)
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<()> {
        if !self.store.soft_delete(id).await? {
            return Err(not_found::<R>());
        }
        tracing::info!(id = %id, "{} moved to trash", R::LABEL);

        Ok(())
    }

    /// Bring a trashed row back, provided its name and slug are still free
    pub async fn restore(&self, id: Uuid) -> Result<R> {
        let resource = self
            .store
            .find(id, Scope::All)
            .await?
            .ok_or_else(not_found::<R>)?;

        if !resource.is_trashed() {
            return Err(AppError::BadRequest(format!(
                "{} is not in the trash",
                R::LABEL
            )));
        }

        let draft = ResourceDraft {
            name: resource.name().to_string(),
            slug: resource.slug().to_string(),
        };
        self.ensure_unique(&draft, Some(id)).await?;

        let restored = self
            .store
            .restore(id)
            .await?
            .ok_or_else(not_found::<R>)?;
        tracing::info!(id = %id, "{} restored", R::LABEL);

        Ok(restored)
    }

    /// Remove the row whether it is active or trashed
    pub async fn purge(&self, id: Uuid) -> Result<()> {
        if !self.store.purge(id).await? {
            return Err(not_found::<R>());
        }
        tracing::info!(id = %id, "{} permanently deleted", R::LABEL);

        Ok(())
    }
}
