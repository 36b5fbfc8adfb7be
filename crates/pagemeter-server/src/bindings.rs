//! Route-to-counter binding table.
//!
//! Built once from config, validated against the registry, then looked up
//! per request. Unbound paths cost one hash lookup and nothing else.

use std::collections::HashMap;

use pagemeter_core::error::{PageMeterError, Result};
use pagemeter_core::Registry;

use crate::config::PageBinding;

/// Logical path used for binding lookup and the `path` label.
///
/// Callers pass `Uri::path()`, so host and query are already gone. A trailing
/// slash is dropped except on the root.
pub fn normalize_path(path: &str) -> &str {
    if path.is_empty() {
        return "/";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouteBindings {
    by_path: HashMap<String, String>,
}

impl RouteBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pages(pages: &[PageBinding]) -> Result<Self> {
        let mut out = Self::new();
        for p in pages {
            out.bind(&p.path, &p.counter)?;
        }
        Ok(out)
    }

    /// Bind `path` to `counter`. A path may be bound only once.
    pub fn bind(&mut self, path: &str, counter: &str) -> Result<()> {
        let path = normalize_path(path).to_string();
        if self.by_path.contains_key(&path) {
            return Err(PageMeterError::Config(format!("path bound twice: {path}")));
        }
        self.by_path.insert(path, counter.to_string());
        Ok(())
    }

    /// Every binding must name a registered counter.
    pub fn validate(&self, registry: &Registry) -> Result<()> {
        for (path, counter) in &self.by_path {
            if !registry.contains(counter) {
                return Err(PageMeterError::UnboundCounter {
                    path: path.clone(),
                    counter: counter.clone(),
                });
            }
        }
        Ok(())
    }

    /// Counter bound to an already-normalized path.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.by_path.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}
