use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Documented shape of the write body. The gateway never validates against
/// it; write bodies are relayed to the backend verbatim.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NewTodo {
    pub title: Option<String>,
    pub done: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
    pub id: String,
}
