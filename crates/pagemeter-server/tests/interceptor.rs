//! End-to-end: request -> interceptor -> page handler -> /metrics.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use pagemeter_core::{Counter, Registry};
use pagemeter_server::app_state::AppState;
use pagemeter_server::config::ServerConfig;
use pagemeter_server::interceptor::{Emit, Metered, Observation, PlainResponse, Responder};
use pagemeter_server::router::build_router;

fn app() -> (Router, AppState) {
    let state = AppState::new(ServerConfig::default()).unwrap();
    (build_router(state.clone()), state)
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn count(state: &AppState, counter: &str, values: &[&str]) -> u64 {
    state.registry().get(counter).unwrap().get(values)
}

#[tokio::test]
async fn colombo_request_shows_up_in_metrics() {
    let (app, state) = app();
    let labels = ["GET", "/colombo", "200"];
    assert_eq!(count(&state, "node_colombo_request_total", &labels), 0);

    let (status, body) = send(&app, Method::GET, "/colombo").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("The current time in Colombo is"));
    assert_eq!(count(&state, "node_colombo_request_total", &labels), 1);

    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; version=0.0.4; charset=utf-8"
    );
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(
        text.contains(
            "node_colombo_request_total{method=\"GET\",path=\"/colombo\",status_code=\"200\"} 1\n"
        ),
        "{text}"
    );
    assert!(text.contains("# TYPE node_gandalf_request_total counter"));
}

#[tokio::test]
async fn n_requests_count_n() {
    let (app, state) = app();
    for _ in 0..7 {
        let (status, _) = send(&app, Method::GET, "/gandalf?x=1").await;
        assert_eq!(status, StatusCode::OK);
    }
    let c = state.registry();
    let c = c.get("node_gandalf_request_total").unwrap();
    assert_eq!(c.get(&["GET", "/gandalf", "200"]), 7);
    assert_eq!(c.total(), 7);
    assert_eq!(state.registry().get("node_colombo_request_total").unwrap().total(), 0);
}

#[tokio::test]
async fn unbound_paths_change_nothing() {
    let (app, state) = app();
    let before = state.registry().export_text().unwrap();

    let (status, _) = send(&app, Method::GET, "/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = send(&app, Method::GET, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (_, metrics) = send(&app, Method::GET, "/metrics").await;
    assert_eq!(metrics, before);
    // reading /metrics is side-effect free
    let (_, again) = send(&app, Method::GET, "/metrics").await;
    assert_eq!(again, before);
}

#[tokio::test]
async fn trailing_slash_is_served_and_counted_under_normalized_path() {
    let (app, state) = app();
    let (status, body) = send(&app, Method::GET, "/gandalf/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Gandalf"));

    let (status, _) = send(&app, Method::GET, "/gandalf").await;
    assert_eq!(status, StatusCode::OK);

    let c = state.registry();
    let c = c.get("node_gandalf_request_total").unwrap();
    assert_eq!(c.get(&["GET", "/gandalf", "200"]), 2);
    assert_eq!(c.get(&["GET", "/gandalf/", "200"]), 0);
}

#[tokio::test]
async fn rejected_method_on_bound_path_is_not_counted() {
    let (app, state) = app();
    let (status, _) = send(&app, Method::POST, "/gandalf").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(state.registry().get("node_gandalf_request_total").unwrap().total(), 0);
}

#[tokio::test]
async fn concurrent_requests_sum_exactly() {
    const T: usize = 64;
    let (app, state) = app();

    let mut tasks = Vec::with_capacity(T);
    for _ in 0..T {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let req = Request::builder().uri("/gandalf").body(Body::empty()).unwrap();
            app.oneshot(req).await.unwrap().status()
        }));
    }
    for t in tasks {
        assert_eq!(t.await.unwrap(), StatusCode::OK);
    }
    assert_eq!(count(&state, "node_gandalf_request_total", &["GET", "/gandalf", "200"]), T as u64);
}

fn single_counter_registry() -> Arc<Registry> {
    let mut reg = Registry::new();
    reg.register(Counter::for_requests("node_gandalf_request_total", "x").unwrap())
        .unwrap();
    Arc::new(reg)
}

#[test]
fn status_set_before_emit_is_recorded() {
    let reg = single_counter_registry();
    let obs = Observation::new(
        Arc::clone(&reg),
        "node_gandalf_request_total",
        Method::GET,
        "/gandalf",
    );
    let mut res: Responder = Metered::bound(PlainResponse::default(), obs);
    res.set_status(StatusCode::NOT_FOUND);

    let resp = res.html("gone".into());
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let c = reg.get("node_gandalf_request_total").unwrap();
    assert_eq!(c.get(&["GET", "/gandalf", "404"]), 1);
    assert_eq!(c.get(&["GET", "/gandalf", "200"]), 0);
}

#[test]
fn recording_failure_does_not_block_response() {
    let reg = single_counter_registry();
    let obs = Observation::new(
        Arc::clone(&reg),
        "node_never_registered_total",
        Method::GET,
        "/gandalf",
    );
    let res: Responder = Metered::bound(PlainResponse::default(), obs);

    let resp = res.text("still delivered".into());
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; charset=utf-8"
    );
    assert_eq!(reg.get("node_gandalf_request_total").unwrap().total(), 0);
}

#[test]
fn unbound_responder_records_nothing() {
    let res = Responder::default();
    assert!(!res.is_bound());
    let resp = res.emit(Body::from("plain"));
    assert_eq!(resp.status(), StatusCode::OK);
}
