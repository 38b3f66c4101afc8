//! # Run Orchestration
//!
//! Loads the catalog once, prices every sales input against it, and renders
//! and writes one report per input.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog.json ──► load_json ──► CatalogIndex::try_build ──┐             │
//! │       (failure here aborts the whole run)                 │             │
//! │                                                           ▼             │
//! │  sales_1.json ──► load_json ──► SaleAggregator::process ──► render ──►  │
//! │  sales_2.json ──► load_json ──► SaleAggregator::process ──► render ──►  │
//! │       (failure here skips only that input)               write file    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each report's elapsed time covers loading the catalog plus that input.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Utc;
use sales_core::{CatalogIndex, CatalogWarning, SaleAggregator};
use tracing::{debug, info, info_span};

use crate::cli::Cli;
use crate::config::ReportConfig;
use crate::error::{AppError, AppResult, DataKind};
use crate::loader::load_json;
use crate::report::{self, ReportContext};

/// A rendered report for one sales input.
#[derive(Debug, Clone)]
pub struct InputReport {
    pub input: PathBuf,
    pub rendered: String,
    /// Where the report was written, if it was.
    pub path: Option<PathBuf>,
}

/// The outcome of a whole invocation.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub reports: Vec<InputReport>,
    /// Sales inputs that could not be reported on.
    pub failures: Vec<AppError>,
}

impl RunOutcome {
    /// Checks if every input produced a report.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the command described by the parsed arguments.
pub fn run(cli: &Cli) -> AppResult<RunOutcome> {
    let config = ReportConfig::resolve(cli.config.as_deref(), cli.overrides())?;
    run_with(&config, &cli.catalog, &cli.sales, !cli.no_write)
}

/// Runs with an already resolved configuration.
///
/// Errors returned here are fatal for the whole run; per-input failures are
/// collected in [`RunOutcome::failures`].
pub fn run_with(
    config: &ReportConfig,
    catalog_path: &Path,
    sales_paths: &[PathBuf],
    write: bool,
) -> AppResult<RunOutcome> {
    let started = Instant::now();

    let raw_catalog = load_json(catalog_path, DataKind::Catalog)?;
    let (catalog, catalog_warnings) = CatalogIndex::try_build(&raw_catalog)
        .map_err(|e| AppError::core(input_name(catalog_path), e))?;
    let catalog_elapsed = started.elapsed();

    info!(
        entries = catalog.len(),
        warnings = catalog_warnings.len(),
        "Catalog loaded"
    );

    let job = Job {
        config,
        catalog: &catalog,
        catalog_warnings: &catalog_warnings,
        catalog_elapsed,
        prefix_stem: sales_paths.len() > 1,
        write,
    };

    let mut outcome = RunOutcome::default();
    for path in sales_paths {
        let name = input_name(path);
        let span = info_span!("run", input = %name);
        let _guard = span.enter();

        match job.run_input(path, &name) {
            Ok(report) => outcome.reports.push(report),
            Err(err) => {
                debug!(error = %err, "Input skipped");
                outcome.failures.push(err);
            }
        }
    }

    info!(
        reports = outcome.reports.len(),
        failures = outcome.failures.len(),
        "Run complete"
    );
    Ok(outcome)
}

/// State shared by every sales input of one run.
struct Job<'a> {
    config: &'a ReportConfig,
    catalog: &'a CatalogIndex,
    catalog_warnings: &'a [CatalogWarning],
    catalog_elapsed: Duration,
    prefix_stem: bool,
    write: bool,
}

impl Job<'_> {
    fn run_input(&self, path: &Path, name: &str) -> AppResult<InputReport> {
        let started = Instant::now();

        let raw_sales = load_json(path, DataKind::Sales)?;
        let summary = SaleAggregator::new(self.catalog)
            .process(&raw_sales)
            .map_err(|e| AppError::core(name, e))?
            .with_elapsed(self.catalog_elapsed + started.elapsed());

        let ctx = ReportContext {
            input_name: name,
            catalog_entries: self.catalog.len(),
            catalog_warnings: self.catalog_warnings,
            precision: self.config.precision,
            generated_at: Utc::now(),
        };
        let rendered = report::render(self.config.format, &ctx, &summary)?;

        let written = if self.write {
            let file_name = report_file_name(&self.config.results_file, path, self.prefix_stem);
            Some(write_report(&self.config.out_dir, &file_name, &rendered)?)
        } else {
            None
        };

        Ok(InputReport {
            input: path.to_path_buf(),
            rendered,
            path: written,
        })
    }
}

/// Name shown for an input: its file name, or the whole path if it has none.
fn input_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Report file name; prefixed with the input's stem when several inputs share
/// one output directory.
fn report_file_name(results_file: &str, input: &Path, prefix_stem: bool) -> String {
    if !prefix_stem {
        return results_file.to_string();
    }
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sales".to_string());
    format!("{}_{}", stem, results_file)
}

fn write_report(out_dir: &Path, file_name: &str, rendered: &str) -> AppResult<PathBuf> {
    fs::create_dir_all(out_dir).map_err(|source| AppError::WriteFailed {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let target = out_dir.join(file_name);
    fs::write(&target, rendered).map_err(|source| AppError::WriteFailed {
        path: target.clone(),
        source,
    })?;

    info!(path = %target.display(), "Report written");
    Ok(target)
}
