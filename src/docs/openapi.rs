use utoipa::OpenApi;

use crate::handlers::error::AppError;
use crate::handlers::types::{DeleteResponse, NewTodo};
use crate::supabase::Todo;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::todo::list,
        crate::handlers::todo::create,
        crate::handlers::todo::update,
        crate::handlers::todo::delete,
    ),
    components(
        schemas(Todo, NewTodo, DeleteResponse, AppError),
    ),
    tags(
        (name = "todos", description = "Pass-through CRUD over the row-secured todos table")
    ),
    info(
        title = "Todo Gateway API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
