//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format (path is configurable)

use axum::{extract::State, http::{header, StatusCode}, response::{IntoResponse, Response}};

use pagemeter_core::metrics::CONTENT_TYPE;

use crate::app_state::AppState;

pub const HEALTH_PATH: &str = "/healthz";

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.registry().export_text() {
        Ok(body) => (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "metrics export failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics export failed").into_response()
        }
    }
}
