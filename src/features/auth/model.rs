use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Caller identity established by the JWT middleware
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// `sub` claim of the verified token
    pub user_id: String,
}
