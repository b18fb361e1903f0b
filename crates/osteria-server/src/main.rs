use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use osteria_server::state::AppState;
use osteria_tracker::{TrackerOptions, VisitorTracker};

/// `osteria health` — liveness probe for Docker HEALTHCHECK.
///
/// Calls `GET http://localhost:$OSTERIA_PORT/health`.
/// Exits 0 if the server responds with HTTP 200, exits 1 otherwise.
fn run_health_check() -> ! {
    let port = std::env::var("OSTERIA_PORT").unwrap_or_else(|_| "3000".to_string());
    let url = format!("http://localhost:{}/health", port);
    match ureq::get(&url).call() {
        Ok(resp) if resp.status() == 200 => std::process::exit(0),
        _ => std::process::exit(1),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Health-check subcommand — must be handled before tokio runtime setup
    // matters, so the binary stays fast when used as a HEALTHCHECK probe.
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(|s| s.as_str()) == Some("health") {
        run_health_check();
    }

    // Initialise structured JSON logging. Level controlled via RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("osteria=info".parse()?),
        )
        .json()
        .init();

    let cfg = osteria_core::config::Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Ensure the data directory exists before opening the visitor store.
    std::fs::create_dir_all(&cfg.data_dir)?;

    if cfg.visitor_secret.is_none() {
        tracing::warn!(
            "OSTERIA_VISITOR_SECRET not set — visitor IDs use the degraded \
             non-cryptographic hash. Set a secret for production."
        );
    }

    // Opening the tracker performs the one-time legacy store copy-forward.
    let tracker = VisitorTracker::open(TrackerOptions::from_config(&cfg)).await?;
    info!(
        store = %cfg.visitor_store,
        retention_days = cfg.visitor_retention_days,
        max_records = cfg.visitor_max_records,
        "Visitor tracker ready"
    );

    let state = Arc::new(AppState::new(tracker, cfg.clone()));

    let addr = format!("0.0.0.0:{}", cfg.port);
    let app = osteria_server::app::build_app(Arc::clone(&state));

    info!(port = cfg.port, "Osteria listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
