use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::state::AppState;

/// Page-view tracking middleware.
///
/// Runs on every request and records a visit for plain page GETs — API,
/// admin, and health traffic is never counted. Tracking is fire-and-forget:
/// the record write happens on a spawned task so a slow or failing store
/// never delays the page response, and failures are only logged.
pub async fn track_visit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::GET && is_trackable_path(request.uri().path()) {
        let ip = extract_client_ip(request.headers());
        let user_agent = request
            .headers()
            .get(axum::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let tracker = Arc::clone(&state.tracker);
        tokio::spawn(async move {
            if let Err(e) = tracker.track(&ip, &user_agent).await {
                warn!(error = %e, "Visitor tracking failed; page served regardless");
            }
        });
    }

    next.run(request).await
}

/// Public site pages only: everything except API, admin, and probe routes.
fn is_trackable_path(path: &str) -> bool {
    !(path.starts_with("/api") || path.starts_with("/admin") || path == "/health")
}

/// Extract the real client IP from `X-Forwarded-For` (first entry).
///
/// Falls back to `"unknown"` when the header is absent; the derived visitor
/// ID still deduplicates on the User-Agent in that case.
pub fn extract_client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
