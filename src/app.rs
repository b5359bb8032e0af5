use crate::config::Settings;
use crate::docs::openapi::ApiDoc;
use crate::handlers;
use crate::init::StartupError;
use crate::middleware::token::with_backend_client;
use crate::supabase::ClientFactory;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, put},
    Json, Router,
};

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::instrument;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

fn todo_routes(factory: ClientFactory) -> Router {
    Router::new()
        .route(
            "/todo-app",
            get(handlers::todo::list).post(handlers::todo::create),
        )
        .route(
            "/todo-app/{id}",
            put(handlers::todo::update).delete(handlers::todo::delete),
        )
        .layer(from_fn_with_state(factory, with_backend_client))
}

#[instrument(name = "build_app", skip_all)]
pub fn build_app(settings: Settings) -> Result<Router, StartupError> {
    let factory = ClientFactory::new(&settings)?;

    let mut doc = ApiDoc::openapi();
    doc.components.as_mut().unwrap().security_schemes.insert(
        "BearerAuth".to_string(),
        SecurityScheme::Http(
            HttpBuilder::new()
                .scheme(HttpAuthScheme::Bearer)
                .bearer_format("JWT")
                .build(),
        ),
    );

    Ok(Router::new()
        .merge(todo_routes(factory))
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let doc = doc.clone();
                async move { Json(doc) }
            }),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()))
}
