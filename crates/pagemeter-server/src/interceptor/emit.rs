use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::http::{
    header, request::Parts, HeaderMap, HeaderName, HeaderValue, Method, StatusCode,
};
use axum::response::Response;

use pagemeter_core::{LabelRecord, Registry};

/// Per-request response handle with a single emission point.
pub trait Emit: Sized + Send {
    fn status(&self) -> StatusCode;
    fn set_status(&mut self, status: StatusCode);
    fn insert_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Finish the response with `body`.
    fn emit(self, body: Body) -> Response;

    fn html(mut self, body: String) -> Response {
        self.insert_header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        self.emit(Body::from(body))
    }

    fn text(mut self, body: String) -> Response {
        self.insert_header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.emit(Body::from(body))
    }
}

/// Undecorated handle: status + headers, then a body.
#[derive(Debug, Clone, Default)]
pub struct PlainResponse {
    status: StatusCode,
    headers: HeaderMap,
}

impl Emit for PlainResponse {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn emit(self, body: Body) -> Response {
        let mut resp = Response::new(body);
        *resp.status_mut() = self.status;
        *resp.headers_mut() = self.headers;
        resp
    }
}

/// What a bound request increments, captured when the request arrives.
#[derive(Debug, Clone)]
pub struct Observation {
    registry: Arc<Registry>,
    counter: String,
    method: Method,
    path: String,
}

impl Observation {
    pub fn new(registry: Arc<Registry>, counter: &str, method: Method, path: &str) -> Self {
        Self {
            registry,
            counter: counter.to_string(),
            method,
            path: path.to_string(),
        }
    }
}

/// Metrics-aware decorator around another [`Emit`].
#[derive(Debug, Clone, Default)]
pub struct Metered<S> {
    inner: S,
    observation: Option<Observation>,
}

/// The handle page handlers receive.
pub type Responder = Metered<PlainResponse>;

impl<S: Emit> Metered<S> {
    pub fn unbound(inner: S) -> Self {
        Self { inner, observation: None }
    }

    pub fn bound(inner: S, observation: Observation) -> Self {
        Self { inner, observation: Some(observation) }
    }

    pub fn is_bound(&self) -> bool {
        self.observation.is_some()
    }

    /// Record the observation, if any. Failures are logged and swallowed so
    /// they never reach the response path.
    fn record(&self) {
        let Some(obs) = &self.observation else {
            return;
        };
        let status = self.inner.status().as_u16();
        let record = LabelRecord::new(obs.method.as_str(), &obs.path, status);
        if let Err(e) = obs.registry.increment(&obs.counter, &record) {
            tracing::error!(
                counter = %obs.counter,
                path = %obs.path,
                kind = e.kind().as_str(),
                error = %e,
                "request metric not recorded"
            );
        }
    }
}

impl<S: Emit> Emit for Metered<S> {
    fn status(&self) -> StatusCode {
        self.inner.status()
    }

    fn set_status(&mut self, status: StatusCode) {
        self.inner.set_status(status);
    }

    fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.inner.insert_header(name, value);
    }

    fn emit(self, body: Body) -> Response {
        self.record();
        self.inner.emit(body)
    }
}

/// Takes the handle installed by [`intercept`](super::intercept). Without
/// one (unbound path, or no middleware) the handler gets an unmetered handle.
#[async_trait]
impl<St> FromRequestParts<St> for Responder
where
    St: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.remove::<Responder>().unwrap_or_default())
    }
}
