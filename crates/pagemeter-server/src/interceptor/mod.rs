//! Request interceptor.
//!
//! Handlers never talk to the registry. They receive a [`Responder`], set a
//! status, and `emit` a body; when the request path is bound to a counter the
//! responder records `(method, path, status_code)` at that moment, so the
//! recorded status is whatever the handler settled on.
//!
//! `emit` takes the handle by value, so a request can be emitted, and
//! counted, at most once.

pub mod emit;
pub mod middleware;

pub use emit::{Emit, Metered, Observation, PlainResponse, Responder};
pub use middleware::intercept;
