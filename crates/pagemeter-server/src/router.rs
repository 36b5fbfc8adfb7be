//! Axum router wiring.
//!
//! Page routes come from config, each served with and without a trailing
//! slash so the router agrees with `normalize_path`. The interceptor is
//! layered over every route so it runs before any handler.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, interceptor, ops};

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new();
    for p in &state.cfg().pages {
        router = router.route(&p.path, p.page.method_router());
        if p.path != "/" {
            router = router.route(&format!("{}/", p.path), p.page.method_router());
        }
    }

    let metrics_path = state.cfg().metrics.path.clone();
    router
        .route(&metrics_path, get(ops::metrics))
        .route(ops::HEALTH_PATH, get(ops::healthz))
        .layer(middleware::from_fn_with_state(state.clone(), interceptor::intercept))
        .with_state(state)
}
