use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{routes, state::AppState, tracking};

/// Construct the Axum [`Router`] with all routes and middleware attached.
///
/// Middleware is applied in outer-to-inner order (outermost runs first on
/// request, last on response):
///
/// 1. `TraceLayer` — structured request/response logging via `tracing`.
/// 2. `CorsLayer` — permissive CORS for the stats endpoint (the admin
///    dashboard may be served from a different origin in development).
/// 3. `track_visit` — fire-and-forget visitor counting on page GETs.
///
/// Any path not matched by an explicit route falls through to the page
/// placeholder, so all public site paths pass the tracking middleware.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/admin/stats", get(routes::stats::get_stats))
        .fallback(get(routes::pages::page))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            tracking::track_visit,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
