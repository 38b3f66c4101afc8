//! # Application Error Type
//!
//! Unified error type for the compute-sales front end.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in compute-sales                          │
//! │                                                                         │
//! │  ConfigError ──────────────────────────┐                                │
//! │  (bad TOML, precision out of range)    │                                │
//! │                                        │                                │
//! │  DataUnavailable ──────────────────────┤                                │
//! │  (missing file, invalid JSON)          ├──► AppError ──► stderr         │
//! │                                        │                  + exit code   │
//! │  CoreError ────────────────────────────┤                                │
//! │  (wrong top-level shape)               │                                │
//! │                                        │                                │
//! │  WriteFailed ──────────────────────────┘                                │
//! │  (report file could not be written)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Recoverable defects inside the data never reach this type; they are
//! warnings printed inside the report.

use std::fmt;
use std::path::PathBuf;

use sales_core::CoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// Which input a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Catalog,
    Sales,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKind::Catalog => write!(f, "catalog"),
            DataKind::Sales => write!(f, "sales"),
        }
    }
}

/// Errors surfaced to the user.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input file could not be read or is not valid JSON.
    ///
    /// The core never sees such input.
    #[error("{kind} data unavailable: {path}: {reason}", path = .path.display())]
    DataUnavailable {
        kind: DataKind,
        path: PathBuf,
        reason: String,
    },

    /// The core rejected an input's top-level shape.
    #[error("{input}: {source}")]
    Core {
        input: String,
        #[source]
        source: CoreError,
    },

    /// The JSON report could not be serialized.
    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),

    /// The report file could not be written.
    #[error("failed to write report {path}: {source}", path = .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Wraps a core error with the name of the input it came from.
    pub fn core(input: impl Into<String>, source: CoreError) -> Self {
        AppError::Core {
            input: input.into(),
            source,
        }
    }

    /// Process exit code for this error.
    ///
    /// Usage errors exit with 2 from clap before any `AppError` exists.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Result type alias for application operations.
pub type AppResult<T> = Result<T, AppError>;
