use super::error::AppError;
use super::types::{DeleteResponse, NewTodo};
use crate::supabase::{SupabaseClient, Todo};
use axum::{extract::Path, http::StatusCode, response::IntoResponse, Extension, Json};
use tracing::info;

#[utoipa::path(
    get,
    path = "/todo-app",
    responses(
        (status = 200, description = "All todos owned by the caller", body = Vec<Todo>),
        (status = 401, description = "Token missing or not resolvable to a user"),
        (status = 500, description = "Backend error"),
    ),
    security(("BearerAuth" = [])),
    tag = "todos"
)]
#[tracing::instrument(name = "handlers::todo::list", skip_all)]
pub(crate) async fn list(
    Extension(backend): Extension<SupabaseClient>,
) -> Result<impl IntoResponse, AppError> {
    let user = backend.current_user().await?;

    let todos = backend.list_todos(&user.id).await?;

    info!(user_id = %user.id, "listed {} todos", todos.len());

    Ok(Json(todos))
}

#[utoipa::path(
    post,
    path = "/todo-app",
    request_body(
        content = NewTodo,
        description = "New todo item, forwarded to the backend as-is",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Inserted rows as stored by the backend", body = Vec<Todo>),
        (status = 500, description = "Backend error"),
    ),
    security(("BearerAuth" = [])),
    tag = "todos"
)]
#[axum::debug_handler]
#[tracing::instrument(name = "handlers::todo::create", skip_all)]
pub(crate) async fn create(
    Extension(backend): Extension<SupabaseClient>,
    // raw JSON: wrong-typed or absent fields go to the backend untouched
    Json(input): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    match backend.insert_todo(&input).await {
        Ok(rows) => Ok((StatusCode::CREATED, Json(rows))),
        Err(e) => {
            tracing::error!(err = ?e, "failed to insert todo");
            Err(e.into())
        }
    }
}

#[utoipa::path(
    put,
    path = "/todo-app/{id}",
    params(
        ("id" = String, Path, description = "Todo ID, relayed to the backend unparsed")
    ),
    request_body(
        content = NewTodo,
        description = "Replacement title and done flag",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Updated rows; empty when the caller owns no such row", body = Vec<Todo>),
        (status = 500, description = "Backend error"),
    ),
    security(("BearerAuth" = [])),
    tag = "todos"
)]
#[tracing::instrument(name = "handlers::todo::update", skip_all, fields(id = %id))]
pub(crate) async fn update(
    Extension(backend): Extension<SupabaseClient>,
    Path(id): Path<String>,
    Json(input): Json<serde_json::Value>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let rows = backend.update_todo(&id, &input).await?;

    info!("update touched {} rows", rows.len());

    Ok(Json(rows))
}

#[utoipa::path(
    delete,
    path = "/todo-app/{id}",
    params(
        ("id" = String, Path, description = "Todo ID, relayed to the backend unparsed")
    ),
    responses(
        (status = 200, description = "Row deleted if the caller owned it", body = DeleteResponse),
        (status = 500, description = "Backend error"),
    ),
    security(("BearerAuth" = [])),
    tag = "todos"
)]
#[tracing::instrument(name = "handlers::todo::delete", skip_all, fields(id = %id))]
pub(crate) async fn delete(
    Extension(backend): Extension<SupabaseClient>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    backend.delete_todo(&id).await?;

    Ok(Json(DeleteResponse {
        message: "Deleted".to_string(),
        id,
    }))
}
