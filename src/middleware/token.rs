use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tracing::info;

use crate::supabase::ClientFactory;

/// Builds the caller-scoped backend client and stores it in the request
/// extensions. Token validation belongs to the backend: a missing or
/// malformed header just means the client runs on the anon key alone.
#[tracing::instrument(name = "middleware::backend_client", skip_all)]
pub(crate) async fn with_backend_client(
    State(factory): State<ClientFactory>,
    headers: axum::http::HeaderMap,
    mut req: Request,
    next: Next,
) -> Response<Body> {
    let bearer = headers.typed_get::<Authorization<Bearer>>();
    info!(has_token = bearer.is_some(), "per-request backend client");

    let client = factory.for_token(bearer.as_ref().map(|b| b.token()));
    req.extensions_mut().insert(client);

    next.run(req).await
}
