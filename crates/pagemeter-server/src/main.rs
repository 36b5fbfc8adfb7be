//! pagemeter server
//!
//! - Page routes from config (defaults: /gandalf, /colombo)
//! - Per-route request counters labelled by method, path, status code
//! - /metrics in Prometheus text format, /healthz
//! - Refuses to start on an inconsistent metrics schema

use tracing_subscriber::{fmt, EnvFilter};

use pagemeter_core::error::{PageMeterError, Result};
use pagemeter_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        tracing::error!(kind = e.kind().as_str(), error = %e, "pagemeter failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_from_env()?;
    let listen = cfg.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| PageMeterError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, "pagemeter starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PageMeterError::Internal(format!("server failed: {e}")))?;

    tracing::info!("pagemeter stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
