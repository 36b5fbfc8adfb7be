//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use pagemeter_core::error::{PageMeterError, Result};

pub use schema::{MetricsSection, PageBinding, ServerConfig, ServerSection};

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PageMeterError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| PageMeterError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Loaded when present in the working directory and nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "pagemeter.yaml";

/// Config file given as the first argument, else `PAGEMETER_CONFIG`, else
/// `./pagemeter.yaml` if it exists, else the built-in defaults.
pub fn load_from_env() -> Result<ServerConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("PAGEMETER_CONFIG").ok());
    load_from_path_or_default(path.as_deref(), DEFAULT_CONFIG_FILE)
}

/// Load `explicit` if given, else `fallback` when that file exists, else the
/// built-in defaults.
pub fn load_from_path_or_default(explicit: Option<&str>, fallback: &str) -> Result<ServerConfig> {
    let path = match explicit {
        Some(p) => Some(p),
        None if Path::new(fallback).is_file() => Some(fallback),
        None => None,
    };
    match path {
        Some(p) => load_from_file(p),
        None => {
            let cfg = ServerConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }
}
