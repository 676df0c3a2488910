use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, PgPool};
use uuid::Uuid;

use super::store::{name_taken, slug_taken, ResourceDraft, ResourceStore, UniqueField};
use super::uniqueness::is_unique_value;
use super::{Resource, Scope};
use crate::core::error::{AppError, Result};

/// PostgreSQL store for any resource laid out as
/// `(id, name, slug, created_at, updated_at, deleted_at)`.
pub struct PgResourceStore<R> {
    pool: PgPool,
    _resource: PhantomData<fn() -> R>,
}

impl<R> PgResourceStore<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _resource: PhantomData,
        }
    }
}

impl<R> std::fmt::Debug for PgResourceStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgResourceStore")
            .field("pool", &"<PgPool>")
            .finish()
    }
}

/// Convert a write error into the conflict the pre-check would have raised.
///
/// The partial unique indexes are the backstop for two writers that both
/// passed the uniqueness check. `slug` is the value being written, when known.
fn handle_write_error<R: Resource>(e: sqlx::Error, slug: Option<&str>) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // PostgreSQL unique_violation
        if db_err.code().as_deref() == Some("23505") {
            tracing::warn!(
                "Unique constraint {:?} rejected {} write",
                db_err.constraint(),
                R::LABEL
            );
            let on_slug = db_err
                .constraint()
                .is_some_and(|constraint| constraint.contains("slug"));
            return match (on_slug, slug) {
                (true, Some(slug)) => slug_taken::<R>(slug),
                (true, None) => AppError::conflict(
                    format!("{} already exists", R::LABEL),
                    "name",
                    "The slug derived from the name is already taken",
                ),
                (false, _) => name_taken::<R>(),
            };
        }
    }

    tracing::error!("Failed to write {}: {:?}", R::LABEL, e);
    AppError::Database(e)
}

fn handle_read_error<R: Resource>(action: &str, e: sqlx::Error) -> AppError {
    tracing::error!("Failed to {} {}: {:?}", action, R::LABEL, e);
    AppError::Database(e)
}

#[async_trait]
impl<R> ResourceStore<R> for PgResourceStore<R>
where
    R: Resource + for<'r> FromRow<'r, PgRow> + Unpin,
{
    async fn insert(&self, draft: &ResourceDraft) -> Result<R> {
        let query = format!(
            "INSERT INTO {} (name, slug) VALUES ($1, $2) RETURNING {}",
            R::TABLE,
            R::COLUMNS
        );

        sqlx::query_as::<_, R>(&query)
            .bind(&draft.name)
            .bind(&draft.slug)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| handle_write_error::<R>(e, Some(&draft.slug)))
    }

    async fn find(&self, id: Uuid, scope: Scope) -> Result<Option<R>> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1 AND {}",
            R::COLUMNS,
            R::TABLE,
            scope.sql_filter()
        );

        sqlx::query_as::<_, R>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| handle_read_error::<R>("find", e))
    }

    async fn list(&self, scope: Scope) -> Result<Vec<R>> {
        let query = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY created_at, id",
            R::COLUMNS,
            R::TABLE,
            scope.sql_filter()
        );

        sqlx::query_as::<_, R>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| handle_read_error::<R>("list", e))
    }

    async fn update(&self, id: Uuid, draft: &ResourceDraft) -> Result<Option<R>> {
        let query = format!(
            r#"
            UPDATE {}
            SET name = $1, slug = $2, updated_at = NOW()
            WHERE id = $3 AND deleted_at IS NULL
            RETURNING {}
            "#,
            R::TABLE,
            R::COLUMNS
        );

        sqlx::query_as::<_, R>(&query)
            .bind(&draft.name)
            .bind(&draft.slug)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| handle_write_error::<R>(e, Some(&draft.slug)))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        let query = format!(
            "UPDATE {} SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
            R::TABLE
        );

        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| handle_read_error::<R>("soft delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn restore(&self, id: Uuid) -> Result<Option<R>> {
        let query = format!(
            r#"
            UPDATE {}
            SET deleted_at = NULL, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NOT NULL
            RETURNING {}
            "#,
            R::TABLE,
            R::COLUMNS
        );

        sqlx::query_as::<_, R>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            // restoring can collide with an active row created in the meantime
            .map_err(|e| handle_write_error::<R>(e, None))
    }

    async fn purge(&self, id: Uuid) -> Result<bool> {
        let query = format!("DELETE FROM {} WHERE id = $1", R::TABLE);

        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| handle_read_error::<R>("purge", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_unique(
        &self,
        field: UniqueField,
        value: &str,
        scope: Scope,
        exclude: Option<Uuid>,
    ) -> Result<bool> {
        is_unique_value(&self.pool, R::TABLE, field.column(), value, scope, exclude).await
    }
}
