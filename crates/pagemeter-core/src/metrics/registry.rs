//! Metrics registry.
//!
//! The registry is populated once at startup through `&mut self` and then
//! shared behind an `Arc`, which freezes its structure: afterwards only counter
//! values change. Lookups need no lock because the name map is immutable, and
//! each counter synchronizes its own cells.

use std::collections::BTreeMap;

use crate::error::{PageMeterError, Result};
use crate::metrics::counter::Counter;
use crate::metrics::label::LabelRecord;

/// Content type of `export_text` output.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

#[derive(Debug, Default)]
pub struct Registry {
    counters: BTreeMap<String, Counter>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a counter under its name. Duplicate names are a configuration error.
    pub fn register(&mut self, counter: Counter) -> Result<()> {
        if self.counters.contains_key(counter.name()) {
            return Err(PageMeterError::DuplicateCounter(counter.name().to_string()));
        }
        tracing::debug!(counter = %counter.name(), "counter registered");
        self.counters.insert(counter.name().to_string(), counter);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Counter> {
        self.counters.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.counters.contains_key(name)
    }

    /// Registered counter names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.counters.keys().map(String::as_str).collect()
    }

    /// Record one observation against `name`.
    ///
    /// An unknown name means a route was bound to a counter that was never
    /// registered; it is reported as an error rather than dropped.
    pub fn increment(&self, name: &str, record: &LabelRecord<'_>) -> Result<()> {
        let counter = self
            .counters
            .get(name)
            .ok_or_else(|| PageMeterError::UnknownCounter(name.to_string()))?;
        counter.observe(record)
    }

    /// Render every counter, ordered by name, in Prometheus text format.
    pub fn export_text(&self) -> Result<String> {
        let mut out = String::new();
        for counter in self.counters.values() {
            counter.render(&mut out)?;
        }
        Ok(out)
    }
}
