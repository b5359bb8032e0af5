use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use strum_macros::AsRefStr;
use thiserror::Error;
use utoipa::ToSchema;

use crate::supabase::SupabaseError;

#[derive(Debug, Error, AsRefStr, ToSchema)]
#[strum(serialize_all = "snake_case")]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[schema(value_type = String)]
    #[error("{0}")]
    BackendFailure(#[source] SupabaseError),
}

impl From<SupabaseError> for AppError {
    fn from(value: SupabaseError) -> Self {
        match value {
            SupabaseError::Unauthorized => Self::Unauthorized,
            _ => Self::BackendFailure(value),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self, "AppError");

        let status = match &self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BackendFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": self.as_ref(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
