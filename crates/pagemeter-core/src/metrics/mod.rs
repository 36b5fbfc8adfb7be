//! In-process request metrics.
//!
//! Counters are stored as atomics behind sharded maps and rendered in the
//! Prometheus text exposition format by the registry.

pub mod counter;
pub mod label;
pub mod registry;

pub use counter::Counter;
pub use label::{LabelRecord, REQUEST_LABELS};
pub use registry::{Registry, CONTENT_TYPE};
