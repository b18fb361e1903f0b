use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::state::AppState;

/// `GET /api/admin/stats` — visitor rollup for the admin dashboard.
///
/// Returns exactly four counters, camelCase:
/// ```json
/// {
///   "totalUniqueVisitors": 0,
///   "returningVisitors": 0,
///   "newVisitorsToday": 0,
///   "returningVisitorsToday": 0
/// }
/// ```
///
/// The dashboard polls this on an interval. An empty or unreadable store
/// yields zeros, never an error. Admin session auth mounts in front of
/// `/api/admin` when the session layer lands; the tracker itself stores no
/// sensitive data.
#[tracing::instrument(skip(state))]
pub async fn get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.tracker.stats().await)
}
