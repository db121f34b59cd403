//! API Routes
//!
//! Configures the Axum router with all transcript endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    backends_handler, clear_handler, delete_cached_handler, get_by_id_handler, get_by_url_handler,
    health_handler, post_transcript_handler, root_handler, stats_handler,
    transcript_health_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// Static segments (`health`, `backends`, `cache/...`) take priority over `:video_id`.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/v1/transcript/health", get(transcript_health_handler))
        .route("/api/v1/transcript/backends", get(backends_handler))
        .route("/api/v1/transcript/cache/stats", get(stats_handler))
        .route("/api/v1/transcript/cache/clear", delete(clear_handler))
        .route(
            "/api/v1/transcript/",
            get(get_by_url_handler).post(post_transcript_handler),
        )
        .route(
            "/api/v1/transcript",
            get(get_by_url_handler).post(post_transcript_handler),
        )
        .route("/api/v1/transcript/:video_id", get(get_by_id_handler))
        .route(
            "/api/v1/transcript/:video_id/cache",
            delete(delete_cached_handler),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
