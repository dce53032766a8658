//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Layers (outermost → innermost): CORS → access log → body limit → handler.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router over a shared context.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(ctx: ApiContext) -> Router {
    let body_limit = ctx.max_upload_bytes;

    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/predict", post(endpoints::predict::predict))
        .route("/diseases", get(endpoints::diseases::list))
        .route("/disease/:name", get(endpoints::diseases::detail))
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::access::log_request))
        .layer(CorsLayer::permissive())
}
