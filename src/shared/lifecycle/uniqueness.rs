use sqlx::PgExecutor;
use uuid::Uuid;

use super::Scope;
use crate::core::error::{AppError, Result};
use crate::shared::validation::SQL_IDENTIFIER_REGEX;

/// Check whether `value` is free in `table.column` among the rows of `scope`.
///
/// `exclude_id` removes one row from consideration so an update does not
/// collide with itself. `table` and `column` are interpolated into the SQL
/// and must be plain identifiers.
pub async fn is_unique_value<'e, E>(
    executor: E,
    table: &str,
    column: &str,
    value: &str,
    scope: Scope,
    exclude_id: Option<Uuid>,
) -> Result<bool>
where
    E: PgExecutor<'e>,
{
    if !SQL_IDENTIFIER_REGEX.is_match(table) || !SQL_IDENTIFIER_REGEX.is_match(column) {
        return Err(AppError::Internal(format!(
            "Refusing uniqueness check on identifier {}.{}",
            table, column
        )));
    }

    let query = format!(
        r#"
        SELECT NOT EXISTS (
            SELECT 1 FROM {table}
            WHERE {column} = $1
              AND {filter}
              AND ($2::uuid IS NULL OR id <> $2)
        )
        "#,
        filter = scope.sql_filter(),
    );

    sqlx::query_scalar::<_, bool>(&query)
        .bind(value)
        .bind(exclude_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check uniqueness of {}.{}: {:?}", table, column, e);
            AppError::Database(e)
        })
}
