//! # compute-sales: Sales Report Front End
//!
//! Reads a product catalog and one or more sales files, prices them with
//! `sales-core`, and writes a report per sales file.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      compute-sales                                      │
//! │                                                                         │
//! │   main.rs                                                               │
//! │     │ init_tracing()                                                    │
//! │     ▼                                                                   │
//! │   cli ──► config ──► runner ──► loader (JSON files)                     │
//! │                        │                                                │
//! │                        ├──► sales-core (CatalogIndex, SaleAggregator)   │
//! │                        │                                                │
//! │                        └──► report (text / json) ──► stdout + file      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//! ```text
//! compute_sales/
//! ├── lib.rs       ◄── You are here (tracing setup, re-exports)
//! ├── cli.rs       ◄── clap arguments
//! ├── config.rs    ◄── Report settings (flags > env > TOML > defaults)
//! ├── error.rs     ◄── AppError
//! ├── loader.rs    ◄── JSON file loading
//! ├── report.rs    ◄── Text and JSON rendering
//! └── runner.rs    ◄── Orchestration and report writing
//! ```

use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;
pub mod runner;

pub use cli::Cli;
pub use config::{ReportConfig, ReportFormat};
pub use error::{AppError, AppResult, DataKind};
pub use runner::{run, run_with, InputReport, RunOutcome};

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn,compute_sales=info,sales_core=info";

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins when set. Output goes to stderr so stdout carries only
/// reports.
pub fn init_tracing(quiet: bool) {
    let default = if quiet { "error" } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
