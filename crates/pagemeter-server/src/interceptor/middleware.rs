use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::app_state::AppState;
use crate::bindings::normalize_path;
use crate::interceptor::emit::{Metered, Observation, PlainResponse};

/// Outermost middleware. For bound paths it installs a metered [`Responder`]
/// in the request extensions; unbound paths pass straight through. Always
/// calls `next`.
///
/// [`Responder`]: crate::interceptor::Responder
pub async fn intercept(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = normalize_path(req.uri().path());
    if let Some(counter) = state.bindings().lookup(path) {
        let obs = Observation::new(state.registry(), counter, req.method().clone(), path);
        req.extensions_mut().insert(Metered::bound(PlainResponse::default(), obs));
    }
    next.run(req).await
}
