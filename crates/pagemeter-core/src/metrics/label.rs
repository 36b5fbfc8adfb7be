//! Per-request label record.

/// Labels carried by every request counter, in exposition order.
pub const REQUEST_LABELS: [&str; 3] = ["method", "path", "status_code"];

/// One observation's label values. Built at response emission and dropped
/// right after the increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelRecord<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub status_code: u16,
}

impl<'a> LabelRecord<'a> {
    pub fn new(method: &'a str, path: &'a str, status_code: u16) -> Self {
        Self { method, path, status_code }
    }

    /// Values in `REQUEST_LABELS` order.
    pub fn values(&self) -> [String; 3] {
        [
            self.method.to_string(),
            self.path.to_string(),
            self.status_code.to_string(),
        ]
    }
}
