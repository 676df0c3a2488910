use std::collections::BTreeMap;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Field name -> human readable reason
pub type FieldErrors = BTreeMap<String, String>;

/// Uniform response envelope shared by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validations: Option<FieldErrors>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            validations: None,
        }
    }

    /// Failed envelope. Every failure is also written to the log.
    pub fn failure(
        status: StatusCode,
        message: impl Into<String>,
        validations: Option<FieldErrors>,
    ) -> ApiResponse<()> {
        let message = message.into();
        tracing::warn!(
            status = status.as_u16(),
            validations = ?validations,
            "Error: {}",
            message
        );

        ApiResponse {
            success: false,
            message,
            data: None,
            validations,
        }
    }
}
