//! Iso-Seq regression driver CLI
//!
//! Runs the pbtranscript pipeline on the BAM-input regression dataset and
//! compares the result against the recorded bax.h5-input reference run.
//!
//! ```bash
//! isoseq-regress                       # historical defaults, from the current directory
//! isoseq-regress --compare "diff -r"   # swap the comparison utility
//! isoseq-regress config show           # print the effective configuration
//! ```
//!
//! The comparison report is written to `results.txt` and the comparison
//! exit status is printed on stdout. The process itself exits 0 whenever
//! the sequence completes, whatever the comparison reported.

mod args;
mod commands;
mod console;
mod logging;
mod router;

use std::process::ExitCode;

use args::Cli;
use clap::Parser;
use isoseq_regress_core::RegressError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match router::route(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let console = console::CliConsole::new(true);
            console.error(&e.to_string());
            if let Some(context) = e
                .downcast_ref::<RegressError>()
                .and_then(|inner| inner.context())
            {
                console.detail(context);
            }
            ExitCode::FAILURE
        }
    }
}
