//! compute-sales binary entry point.

use std::process::ExitCode;

use clap::Parser;
use compute_sales::{init_tracing, run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let outcome = match run(&cli) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::from(err.exit_code());
        }
    };

    if !cli.quiet {
        for report in &outcome.reports {
            print!("{}", report.rendered);
        }
    }

    let mut code = 0;
    for err in &outcome.failures {
        eprintln!("error: {}", err);
        code = code.max(err.exit_code());
    }
    ExitCode::from(code)
}
