#[cfg(test)]
pub mod memory;

use crate::features::categories::models::Category;
use crate::shared::lifecycle::PgResourceStore;

/// PostgreSQL-backed category store
pub type PgCategoryStore = PgResourceStore<Category>;
