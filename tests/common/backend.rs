//! In-process stand-in for the hosted backend: a GoTrue-shaped
//! `/auth/v1/user` endpoint and a PostgREST-shaped `/rest/v1/todos`
//! endpoint with row-level security simulated by scoping every operation
//! to the user the bearer token resolves to.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;

pub const ANON_KEY: &str = "test-anon-key";
pub const TOKEN_ALICE: &str = "token-alice";
pub const TOKEN_BOB: &str = "token-bob";
pub const USER_ALICE: &str = "11111111-1111-1111-1111-111111111111";
pub const USER_BOB: &str = "22222222-2222-2222-2222-222222222222";

#[derive(Clone, Debug, serde::Serialize)]
struct Row {
    id: i64,
    user_id: String,
    title: String,
    done: bool,
}

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: Vec<Row>,
}

type Db = Arc<RwLock<Table>>;

pub fn mock_backend() -> Router {
    let db: Db = Db::default();

    Router::new()
        .route("/auth/v1/user", get(auth_user))
        .route(
            "/rest/v1/todos",
            get(select_todos)
                .post(insert_todo)
                .patch(update_todos)
                .delete(delete_todos),
        )
        .with_state(db)
}

fn resolve_user(headers: &HeaderMap) -> Option<&'static str> {
    let token = headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;

    match token {
        TOKEN_ALICE => Some(USER_ALICE),
        TOKEN_BOB => Some(USER_BOB),
        _ => None,
    }
}

fn require_api_key(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    if headers.get("apikey").map(|v| v.as_bytes()) == Some(ANON_KEY.as_bytes()) {
        return Ok(());
    }

    Err((
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "No API key found in request" })),
    ))
}

fn filtered_id(params: &HashMap<String, String>) -> Result<i64, (StatusCode, Json<Value>)> {
    params
        .get("id")
        .and_then(|v| v.strip_prefix("eq."))
        .and_then(|v| v.parse().ok())
        .ok_or((
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "invalid input syntax for type bigint" })),
        ))
}

async fn auth_user(headers: HeaderMap) -> impl IntoResponse {
    match resolve_user(&headers) {
        Some(user_id) => (StatusCode::OK, Json(json!({ "id": user_id }))),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "msg": "invalid JWT" })),
        ),
    }
}

async fn select_todos(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Row>>, (StatusCode, Json<Value>)> {
    require_api_key(&headers)?;
    let user_id = resolve_user(&headers);

    let table = db.read().await;
    let mut rows: Vec<Row> = table
        .rows
        .iter()
        .filter(|row| Some(row.user_id.as_str()) == user_id)
        .filter(|row| match params.get("user_id").and_then(|v| v.strip_prefix("eq.")) {
            Some(filter) => row.user_id == filter,
            None => true,
        })
        .cloned()
        .collect();
    rows.sort_by_key(|row| row.id);

    Ok(Json(rows))
}

async fn insert_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Vec<Row>>), (StatusCode, Json<Value>)> {
    require_api_key(&headers)?;
    let Some(user_id) = resolve_user(&headers) else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "new row violates row-level security policy for table \"todos\"" })),
        ));
    };

    let title = match body.get("title") {
        Some(Value::String(title)) => title.clone(),
        Some(_) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "invalid input syntax for type text" })),
            ))
        }
        None => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "null value in column \"title\" of relation \"todos\" violates not-null constraint" })),
            ))
        }
    };

    let mut table = db.write().await;
    table.next_id += 1;
    let row = Row {
        id: table.next_id,
        user_id: user_id.to_string(),
        title: title.to_string(),
        done: body.get("done").and_then(Value::as_bool).unwrap_or(false),
    };
    table.rows.push(row.clone());

    Ok((StatusCode::CREATED, Json(vec![row])))
}

async fn update_todos(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Result<Json<Vec<Row>>, (StatusCode, Json<Value>)> {
    require_api_key(&headers)?;
    let user_id = resolve_user(&headers);
    let id = filtered_id(&params)?;

    let mut table = db.write().await;
    let mut touched = Vec::new();
    for row in table.rows.iter_mut() {
        if row.id != id || Some(row.user_id.as_str()) != user_id {
            continue;
        }
        if let Some(title) = body.get("title").and_then(Value::as_str) {
            row.title = title.to_string();
        }
        if let Some(done) = body.get("done").and_then(Value::as_bool) {
            row.done = done;
        }
        touched.push(row.clone());
    }

    Ok(Json(touched))
}

async fn delete_todos(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    require_api_key(&headers)?;
    let user_id = resolve_user(&headers);
    let id = filtered_id(&params)?;

    let mut table = db.write().await;
    table
        .rows
        .retain(|row| row.id != id || Some(row.user_id.as_str()) != user_id);

    Ok(StatusCode::NO_CONTENT)
}
