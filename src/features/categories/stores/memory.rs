//! In-memory category store used by tests.
//!
//! Mirrors the PostgreSQL schema: name and slug are unique among active
//! rows, so a write that slips past the lifecycle pre-check still fails.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::categories::models::Category;
use crate::shared::lifecycle::{
    name_taken, slug_taken, ResourceDraft, ResourceStore, Scope, UniqueField,
};

#[derive(Debug, Default)]
pub struct InMemoryCategoryStore {
    rows: RwLock<Vec<Category>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every row regardless of state, for assertions
    pub async fn snapshot(&self) -> Vec<Category> {
        self.rows.read().await.clone()
    }
}

fn holds(row: &Category, field: UniqueField, value: &str) -> bool {
    match field {
        UniqueField::Name => row.name == value,
        UniqueField::Slug => row.slug == value,
    }
}

/// Unique-index emulation over active rows
fn check_constraints(rows: &[Category], draft: &ResourceDraft, exclude: Option<Uuid>) -> Result<()> {
    let active = rows
        .iter()
        .filter(|row| row.deleted_at.is_none() && Some(row.id) != exclude);

    for row in active {
        if row.name == draft.name {
            return Err(name_taken::<Category>());
        }
        if row.slug == draft.slug {
            return Err(slug_taken::<Category>(&draft.slug));
        }
    }

    Ok(())
}

#[async_trait]
impl ResourceStore<Category> for InMemoryCategoryStore {
    async fn insert(&self, draft: &ResourceDraft) -> Result<Category> {
        let mut rows = self.rows.write().await;
        check_constraints(&rows, draft, None)?;

        let now = Utc::now();
        let category = Category {
            id: Uuid::now_v7(),
            name: draft.name.clone(),
            slug: draft.slug.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.push(category.clone());

        Ok(category)
    }

    async fn find(&self, id: Uuid, scope: Scope) -> Result<Option<Category>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|row| row.id == id && scope.admits(row.deleted_at))
            .cloned())
    }

    async fn list(&self, scope: Scope) -> Result<Vec<Category>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| scope.admits(row.deleted_at))
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, draft: &ResourceDraft) -> Result<Option<Category>> {
        let mut rows = self.rows.write().await;
        check_constraints(&rows, draft, Some(id))?;

        let Some(row) = rows
            .iter_mut()
            .find(|row| row.id == id && row.deleted_at.is_none())
        else {
            return Ok(None);
        };

        row.name = draft.name.clone();
        row.slug = draft.slug.clone();
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.write().await;
        match rows
            .iter_mut()
            .find(|row| row.id == id && row.deleted_at.is_none())
        {
            Some(row) => {
                row.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn restore(&self, id: Uuid) -> Result<Option<Category>> {
        let mut rows = self.rows.write().await;

        let draft = match rows
            .iter()
            .find(|row| row.id == id && row.deleted_at.is_some())
        {
            Some(row) => ResourceDraft {
                name: row.name.clone(),
                slug: row.slug.clone(),
            },
            None => return Ok(None),
        };
        check_constraints(&rows, &draft, Some(id))?;

        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .expect("row located above");
        row.deleted_at = None;
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn purge(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() < before)
    }

    async fn is_unique(
        &self,
        field: UniqueField,
        value: &str,
        scope: Scope,
        exclude: Option<Uuid>,
    ) -> Result<bool> {
        let rows = self.rows.read().await;
        Ok(!rows.iter().any(|row| {
            scope.admits(row.deleted_at) && Some(row.id) != exclude && holds(row, field, value)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;

    fn draft(name: &str, slug: &str) -> ResourceDraft {
        ResourceDraft {
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_enforces_unique_slug_among_active_rows() {
        let store = InMemoryCategoryStore::new();
        store.insert(&draft("Tech News", "tech-news")).await.unwrap();

        let err = store
            .insert(&draft("Tech-News", "tech-news"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_trashed_rows_release_their_values() {
        let store = InMemoryCategoryStore::new();
        let first = store.insert(&draft("Sports", "sports")).await.unwrap();
        assert!(store.soft_delete(first.id).await.unwrap());

        assert!(store
            .is_unique(UniqueField::Name, "Sports", Scope::Active, None)
            .await
            .unwrap());
        assert!(!store
            .is_unique(UniqueField::Name, "Sports", Scope::All, None)
            .await
            .unwrap());
        store.insert(&draft("Sports", "sports")).await.unwrap();
    }

    #[tokio::test]
    async fn test_soft_delete_only_matches_active_rows() {
        let store = InMemoryCategoryStore::new();
        let category = store.insert(&draft("Music", "music")).await.unwrap();

        assert!(store.soft_delete(category.id).await.unwrap());
        assert!(!store.soft_delete(category.id).await.unwrap());
        assert!(store.find(category.id, Scope::Trashed).await.unwrap().is_some());
    }
}
