//! Shared error type across pagemeter crates.

use thiserror::Error;

/// Stable error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Inconsistent metrics schema or config. Fatal at startup.
    Configuration,
    /// Binding/registration mismatch discovered while serving.
    Invariant,
    /// Exposition could not be produced.
    Export,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "CONFIGURATION",
            ErrorKind::Invariant => "INVARIANT",
            ErrorKind::Export => "EXPORT",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PageMeterError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum PageMeterError {
    #[error("duplicate counter: {0}")]
    DuplicateCounter(String),
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("route {path} is bound to unregistered counter {counter}")]
    UnboundCounter { path: String, counter: String },
    #[error("unknown counter: {0}")]
    UnknownCounter(String),
    #[error("label mismatch on {counter}: expected [{expected}], got [{got}]")]
    LabelMismatch {
        counter: String,
        expected: String,
        got: String,
    },
    #[error("invalid config: {0}")]
    Config(String),
    #[error("export failed: {0}")]
    Export(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PageMeterError {
    /// Map an error to its stable category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PageMeterError::DuplicateCounter(_)
            | PageMeterError::InvalidName(_)
            | PageMeterError::UnboundCounter { .. }
            | PageMeterError::Config(_) => ErrorKind::Configuration,
            PageMeterError::UnknownCounter(_) | PageMeterError::LabelMismatch { .. } => {
                ErrorKind::Invariant
            }
            PageMeterError::Export(_) => ErrorKind::Export,
            PageMeterError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<std::fmt::Error> for PageMeterError {
    fn from(e: std::fmt::Error) -> Self {
        PageMeterError::Export(e.to_string())
    }
}
