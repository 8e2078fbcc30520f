use std::sync::Arc;

use axum::http::HeaderName;
use axum::{
    routing::{get, post},
    Router,
};
use stockmerge_core::MergeConfig;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;

/// Build the application router. The merge configuration is explicit state
/// rather than a global so tests can vary the schema per router.
pub fn configure_routes(config: Arc<MergeConfig>) -> Router {
    // Browsers can only read the merge report header if CORS exposes it.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(handlers::merge::MERGE_REPORT_HEADER)]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/merge", post(handlers::merge::merge))
        .layer(cors)
        .with_state(config)
}
