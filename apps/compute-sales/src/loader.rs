//! Reading JSON inputs from disk.
//!
//! Anything that stops a file from becoming a `serde_json::Value` is reported
//! as [`AppError::DataUnavailable`]; shape problems are left to the core.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{AppError, AppResult, DataKind};

/// Reads and parses a JSON file.
pub fn load_json(path: &Path, kind: DataKind) -> AppResult<Value> {
    let unavailable = |reason: String| AppError::DataUnavailable {
        kind,
        path: path.to_path_buf(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
    let value: Value =
        serde_json::from_str(&content).map_err(|e| unavailable(format!("invalid JSON: {}", e)))?;

    debug!(path = %path.display(), %kind, bytes = content.len(), "Loaded input");
    Ok(value)
}
