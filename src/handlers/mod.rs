pub(crate) mod error;
pub(crate) mod todo;
pub mod types;

use axum::{http::StatusCode, response::IntoResponse};

#[tracing::instrument(name = "health", skip_all)]
pub(crate) async fn health() -> impl IntoResponse {
    StatusCode::OK
}
