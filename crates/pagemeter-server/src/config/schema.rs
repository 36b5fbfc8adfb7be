use std::collections::HashSet;
use std::net::SocketAddr;

use pagemeter_core::error::{PageMeterError, Result};
use serde::Deserialize;

use crate::bindings::normalize_path;
use crate::ops::HEALTH_PATH;
use crate::pages::Page;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub metrics: MetricsSection,

    #[serde(default = "default_pages")]
    pub pages: Vec<PageBinding>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            metrics: MetricsSection::default(),
            pages: default_pages(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PageMeterError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        validate_route_path("metrics.path", &self.metrics.path)?;
        if self.metrics.path == HEALTH_PATH {
            return Err(PageMeterError::Config(format!(
                "metrics.path must not be {HEALTH_PATH}"
            )));
        }

        let mut seen = HashSet::new();
        for p in &self.pages {
            validate_route_path("pages[].path", &p.path)?;
            if p.path == self.metrics.path || p.path == HEALTH_PATH {
                return Err(PageMeterError::Config(format!(
                    "page path {} collides with an operational endpoint",
                    p.path
                )));
            }
            if !seen.insert(p.path.as_str()) {
                return Err(PageMeterError::Config(format!("duplicate page path: {}", p.path)));
            }
            if p.counter.is_empty() {
                return Err(PageMeterError::Config(format!(
                    "page {} has an empty counter",
                    p.path
                )));
            }
        }
        Ok(())
    }

    /// Parsed listen address. Valid after `validate`.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.server
            .listen
            .parse()
            .map_err(|e| {
                PageMeterError::Config(format!("server.listen must be a valid SocketAddr: {e}"))
            })
    }
}

fn validate_route_path(field: &str, path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(PageMeterError::Config(format!("{field} must start with '/': {path}")));
    }
    if path.contains(&['?', '#'][..]) {
        return Err(PageMeterError::Config(format!("{field} must not carry a query: {path}")));
    }
    // concrete paths only; these would become router captures
    if path.contains(&[':', '*', '{', '}'][..]) {
        return Err(PageMeterError::Config(format!("{field} must be a literal path: {path}")));
    }
    if normalize_path(path) != path {
        return Err(PageMeterError::Config(format!(
            "{field} must be normalized (no trailing '/'): {path}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|_| {
            PageMeterError::Config(format!(
                "server.listen must be a valid SocketAddr: {}",
                self.listen
            ))
        })?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self { path: default_metrics_path() }
    }
}

/// One instrumented page: where it is served, what it renders, and which
/// counter its requests increment.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageBinding {
    pub path: String,
    pub page: Page,
    pub counter: String,
    #[serde(default)]
    pub help: String,
}

fn default_listen() -> String {
    "0.0.0.0:80".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}
fn default_pages() -> Vec<PageBinding> {
    vec![
        PageBinding {
            path: "/gandalf".into(),
            page: Page::Gandalf,
            counter: "node_gandalf_request_total".into(),
            help: "The total number of GET requests received at /gandalf".into(),
        },
        PageBinding {
            path: "/colombo".into(),
            page: Page::Colombo,
            counter: "node_colombo_request_total".into(),
            help: "The total number of GET requests received at /colombo".into(),
        },
    ]
}
