//! pagemeter core: the request-metrics registry, counters, and label records.
//!
//! This crate owns the metrics model shared by the web server and its tests.
//! It carries no HTTP or runtime dependencies so the registry can be reused
//! behind any transport.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `PageMeterError`/`Result` so a metrics
//! fault never takes the process down with it.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;

/// Shared result type.
pub use error::{PageMeterError, Result};
pub use metrics::{Counter, LabelRecord, Registry};
