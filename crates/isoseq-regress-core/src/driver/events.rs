//! Progress events emitted while a run advances

use std::path::PathBuf;

use crate::process::StepRecord;

/// Callback receiving every [`DriverEvent`] in order
pub type ProgressCallback = Box<dyn Fn(&DriverEvent) + Send + Sync>;

/// Something the driver reports while running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    /// The pipeline runner exited
    RunnerFinished(StepRecord),
    /// The comparison is about to start
    Comparing {
        fresh_output_dir: PathBuf,
        reference_dir: PathBuf,
    },
    /// The comparison utility exited
    ComparisonFinished(StepRecord),
}

impl DriverEvent {
    /// Lines this event prints on the console
    pub fn console_lines(&self) -> Vec<String> {
        match self {
            DriverEvent::RunnerFinished(_) => Vec::new(),
            DriverEvent::Comparing {
                fresh_output_dir,
                reference_dir,
            } => vec![
                format!("Fresh run (BAM input): {}", fresh_output_dir.display()),
                format!("Reference run (bax.h5 input): {}", reference_dir.display()),
            ],
            DriverEvent::ComparisonFinished(record) => vec![record.status.to_string()],
        }
    }
}

/// Prints console lines to stdout
pub(crate) fn print_to_stdout(event: &DriverEvent) {
    for line in event.console_lines() {
        println!("{}", line);
    }
}
