use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which rows a read or write considers, relative to soft deletion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Rows with no `deleted_at`
    #[default]
    Active,
    /// Soft-deleted rows only
    Trashed,
    /// Every row regardless of soft deletion
    All,
}

impl Scope {
    /// SQL predicate selecting the rows of this scope
    pub fn sql_filter(self) -> &'static str {
        match self {
            Scope::Active => "deleted_at IS NULL",
            Scope::Trashed => "deleted_at IS NOT NULL",
            Scope::All => "TRUE",
        }
    }

    /// Whether a row with the given `deleted_at` falls inside this scope
    pub fn admits(self, deleted_at: Option<DateTime<Utc>>) -> bool {
        match self {
            Scope::Active => deleted_at.is_none(),
            Scope::Trashed => deleted_at.is_some(),
            Scope::All => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_active() {
        assert_eq!(Scope::default(), Scope::Active);
    }

    #[test]
    fn test_admits() {
        let now = Some(Utc::now());
        assert!(Scope::Active.admits(None));
        assert!(!Scope::Active.admits(now));
        assert!(Scope::Trashed.admits(now));
        assert!(!Scope::Trashed.admits(None));
        assert!(Scope::All.admits(None) && Scope::All.admits(now));
    }

    #[test]
    fn test_deserializes_lowercase() {
        let scope: Scope = serde_json::from_str("\"trashed\"").unwrap();
        assert_eq!(scope, Scope::Trashed);
        assert!(serde_json::from_str::<Scope>("\"purged\"").is_err());
    }
}
