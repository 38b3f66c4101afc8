//! # Report Configuration
//!
//! Settings that shape how reports are rendered and where they are written.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --precision 3 --out-dir reports                                    │
//! │                                                                         │
//! │  2. Environment Variables (read by clap into the same fields)          │
//! │     COMPUTE_SALES_PRECISION=3                                          │
//! │     COMPUTE_SALES_OUT_DIR=reports                                      │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, or ./compute-sales.toml when present                │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     out_dir ".", results_file "SalesResults.txt", precision 2, text    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # compute-sales.toml
//! [report]
//! out_dir = "reports"
//! results_file = "SalesResults.txt"
//! precision = 2      # fractional digits shown for amounts
//! format = "text"    # text | json
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// =============================================================================
// Constants
// =============================================================================

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "compute-sales.toml";

/// Default report file name.
pub const DEFAULT_RESULTS_FILE: &str = "SalesResults.txt";

/// Default number of fractional digits for rendered amounts.
pub const DEFAULT_PRECISION: u32 = 2;

/// Largest accepted precision.
pub const MAX_PRECISION: u32 = 8;

// =============================================================================
// Report Format
// =============================================================================

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Fixed-width receipt text.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(ConfigError::InvalidValue(format!(
                "Unknown report format: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

// =============================================================================
// Report Config
// =============================================================================

/// Fully resolved report settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory report files are written to.
    pub out_dir: PathBuf,
    /// Report file name (no directory part).
    pub results_file: String,
    /// Fractional digits for rendered amounts and quantities.
    pub precision: u32,
    /// Output format.
    pub format: ReportFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            out_dir: PathBuf::from("."),
            results_file: DEFAULT_RESULTS_FILE.to_string(),
            precision: DEFAULT_PRECISION,
            format: ReportFormat::Text,
        }
    }
}

/// A partial set of report settings from one source.
///
/// Used both for the `[report]` table of the TOML file and for the
/// flag/environment values collected by clap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportOverrides {
    pub out_dir: Option<PathBuf>,
    pub results_file: Option<String>,
    pub precision: Option<u32>,
    pub format: Option<ReportFormat>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    report: ReportOverrides,
}

impl ReportConfig {
    /// Resolves the effective configuration.
    ///
    /// `file` is an explicit config path; when it is `None` the default file
    /// in the working directory is used if it exists. `overrides` holds the
    /// flag and environment values and wins over the file.
    pub fn resolve(file: Option<&Path>, overrides: ReportOverrides) -> Result<Self, ConfigError> {
        let mut config = ReportConfig::default();

        let default_file = Path::new(DEFAULT_CONFIG_FILE);
        let file = match file {
            Some(path) => Some(path),
            None if default_file.is_file() => Some(default_file),
            None => None,
        };

        if let Some(path) = file {
            let from_file = Self::read_file(path)?;
            config.apply(from_file);
            info!(path = %path.display(), "Loaded config file");
        }

        config.apply(overrides);
        config.validate()?;

        debug!(?config, "Report configuration resolved");
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<ReportOverrides, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadFailed(format!("{}: {}", path.display(), e))
        })?;

        let file: ConfigFile = toml::from_str(&content).map_err(|e| {
            ConfigError::LoadFailed(format!("{}: {}", path.display(), e))
        })?;

        Ok(file.report)
    }

    fn apply(&mut self, overrides: ReportOverrides) {
        if let Some(out_dir) = overrides.out_dir {
            self.out_dir = out_dir;
        }
        if let Some(results_file) = overrides.results_file {
            self.results_file = results_file;
        }
        if let Some(precision) = overrides.precision {
            self.precision = precision;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidValue(format!(
                "precision must be between 0 and {}, got {}",
                MAX_PRECISION, self.precision
            )));
        }

        let name = self.results_file.trim();
        if name.is_empty() {
            return Err(ConfigError::InvalidValue(
                "results_file must not be empty".to_string(),
            ));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(ConfigError::InvalidValue(format!(
                "results_file must be a file name, not a path: '{}'",
                name
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidValue(String),

    #[error("Failed to load config: {0}")]
    LoadFailed(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
