//! pagemeter server library entry.
//!
//! Wires config, the metrics registry, route bindings, the request interceptor,
//! and the page handlers into an axum application. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod bindings;
pub mod config;
pub mod interceptor;
pub mod ops;
pub mod pages;
pub mod router;
