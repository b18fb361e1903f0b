use axum::response::Html;

/// Fallback handler for the public site paths (`/`, `/menu`, …).
///
/// The real marketing pages are rendered by the frontend build and served
/// from a reverse proxy in production; this placeholder keeps the tracking
/// middleware exercisable when the backend runs standalone.
pub async fn page() -> Html<&'static str> {
    Html(
        "<!doctype html>\
         <html><head><title>Osteria</title></head>\
         <body><h1>Osteria</h1><p>Menu and reservations coming right up.</p></body></html>",
    )
}
