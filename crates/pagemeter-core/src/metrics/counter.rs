//! Labelled monotonic counter.
//!
//! Each distinct label-value tuple owns one `AtomicU64` cell inside a
//! `DashMap`, so increments on unrelated tuples only contend on their shard.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{PageMeterError, Result};
use crate::metrics::label::{LabelRecord, REQUEST_LABELS};

/// Helper to escape label values.
pub(crate) fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// HELP text only escapes backslash and newline.
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, `__` prefix reserved.
pub fn is_valid_label_name(name: &str) -> bool {
    if name.starts_with("__") {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug)]
pub struct Counter {
    name: String,
    help: String,
    label_names: Vec<String>,
    cells: DashMap<Vec<String>, AtomicU64>,
}

impl Counter {
    /// Declare a counter with an explicit ordered label schema.
    pub fn new(
        name: impl Into<String>,
        help: impl Into<String>,
        label_names: &[&str],
    ) -> Result<Self> {
        let name = name.into();
        if !is_valid_metric_name(&name) {
            return Err(PageMeterError::InvalidName(format!("metric name {name:?}")));
        }

        let mut names: Vec<String> = Vec::with_capacity(label_names.len());
        for l in label_names {
            if !is_valid_label_name(l) {
                return Err(PageMeterError::InvalidName(format!("label {l:?} on {name}")));
            }
            if names.iter().any(|n| n == l) {
                return Err(PageMeterError::InvalidName(format!(
                    "duplicate label {l:?} on {name}"
                )));
            }
            names.push(l.to_string());
        }

        Ok(Self {
            name,
            help: help.into(),
            label_names: names,
            cells: DashMap::new(),
        })
    }

    /// Declare a counter over the request schema (`method`, `path`, `status_code`).
    pub fn for_requests(name: impl Into<String>, help: impl Into<String>) -> Result<Self> {
        Self::new(name, help, &REQUEST_LABELS)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    /// Increment by 1.
    pub fn inc(&self, values: &[&str]) -> Result<()> {
        self.add(values, 1)
    }

    /// Increment by an arbitrary value. The tuple's cell is created on first use.
    pub fn add(&self, values: &[&str], v: u64) -> Result<()> {
        if values.len() != self.label_names.len() {
            return Err(self.mismatch(values.join(",")));
        }
        let key: Vec<String> = values.iter().map(|v| v.to_string()).collect();

        let cell = self.cells.entry(key).or_insert_with(|| AtomicU64::new(0));
        cell.fetch_add(v, Ordering::Relaxed);
        Ok(())
    }

    /// Record one request observation. The counter must use the request schema.
    pub fn observe(&self, record: &LabelRecord<'_>) -> Result<()> {
        if self.label_names.iter().map(String::as_str).ne(REQUEST_LABELS) {
            return Err(self.mismatch(REQUEST_LABELS.join(",")));
        }
        let [method, path, status] = record.values();
        self.inc(&[method.as_str(), path.as_str(), status.as_str()])
    }

    /// Current value for a tuple; 0 if never observed.
    pub fn get(&self, values: &[&str]) -> u64 {
        let key: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        self.cells
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum over every observed tuple.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|c| c.value().load(Ordering::Relaxed)).sum()
    }

    /// Point-in-time copy of all cells, sorted by label values.
    pub fn snapshot(&self) -> Vec<(Vec<String>, u64)> {
        let mut out: Vec<(Vec<String>, u64)> = self
            .cells
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        out.sort();
        out
    }

    /// Render in Prometheus text exposition format.
    pub(crate) fn render(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "# HELP {} {}", self.name, escape_help(&self.help))?;
        writeln!(out, "# TYPE {} counter", self.name)?;
        for (values, count) in self.snapshot() {
            let label_str = self
                .label_names
                .iter()
                .zip(values.iter())
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            if label_str.is_empty() {
                writeln!(out, "{} {}", self.name, count)?;
            } else {
                writeln!(out, "{}{{{}}} {}", self.name, label_str, count)?;
            }
        }
        Ok(())
    }

    fn mismatch(&self, got: String) -> PageMeterError {
        PageMeterError::LabelMismatch {
            counter: self.name.clone(),
            expected: self.label_names.join(","),
            got,
        }
    }
}
