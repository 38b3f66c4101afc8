//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ReportFormat, ReportOverrides};

/// Prices sale records against a product catalog and writes a sales report.
#[derive(Debug, Clone, Parser)]
#[command(name = "compute-sales", version, about)]
pub struct Cli {
    /// Product catalog (JSON)
    pub catalog: PathBuf,

    /// One or more sales files (JSON), each priced into its own report
    #[arg(required = true)]
    pub sales: Vec<PathBuf>,

    /// Directory the report files are written to
    #[arg(long, env = "COMPUTE_SALES_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// Report file name
    #[arg(long, env = "COMPUTE_SALES_RESULTS_FILE")]
    pub results_file: Option<String>,

    /// Fractional digits shown for amounts (0-8)
    #[arg(long, env = "COMPUTE_SALES_PRECISION")]
    pub precision: Option<u32>,

    /// Report format: text or json
    #[arg(long, env = "COMPUTE_SALES_FORMAT")]
    pub format: Option<ReportFormat>,

    /// Print the report without writing a file
    #[arg(long)]
    pub no_write: bool,

    /// Only log errors and do not echo reports to stdout
    #[arg(short, long)]
    pub quiet: bool,

    /// TOML config file (defaults to ./compute-sales.toml when present)
    #[arg(long, env = "COMPUTE_SALES_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Report settings given on the command line or through the environment.
    pub fn overrides(&self) -> ReportOverrides {
        ReportOverrides {
            out_dir: self.out_dir.clone(),
            results_file: self.results_file.clone(),
            precision: self.precision,
            format: self.format,
        }
    }
}
