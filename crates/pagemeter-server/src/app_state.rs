//! Shared application state.
//!
//! Built once before the listener starts: the registry is populated with one
//! counter per configured page, the route bindings are checked against it,
//! and both are frozen behind `Arc`s. Any inconsistency is returned to `main`
//! so the process refuses to start.

use std::sync::Arc;

use pagemeter_core::error::Result;
use pagemeter_core::{Counter, Registry};

use crate::bindings::RouteBindings;
use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    registry: Arc<Registry>,
}

struct AppStateInner {
    cfg: ServerConfig,
    bindings: RouteBindings,
}

impl AppState {
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        // 1) One request counter per page
        let mut registry = Registry::new();
        for p in &cfg.pages {
            let help = if p.help.is_empty() {
                format!("The total number of requests received at {}", p.path)
            } else {
                p.help.clone()
            };
            registry.register(Counter::for_requests(p.counter.as_str(), help)?)?;
        }

        // 2) Bindings must only name registered counters
        let bindings = RouteBindings::from_pages(&cfg.pages)?;
        bindings.validate(&registry)?;

        tracing::info!(
            counters = registry.names().len(),
            bound_routes = bindings.len(),
            "metrics registry ready"
        );

        Ok(Self::from_parts(cfg, registry, bindings))
    }

    /// Assemble state without the config-driven population step.
    pub fn from_parts(cfg: ServerConfig, registry: Registry, bindings: RouteBindings) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg, bindings }),
            registry: Arc::new(registry),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn bindings(&self) -> &RouteBindings {
        &self.inner.bindings
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }
}
