//! The regression driver
//!
//! A strictly linear sequence: clear the results file, run the pipeline,
//! announce the two directories, clear again, run the comparison with its
//! stdout redirected into the results file, report the comparison status.

mod events;
mod executor;
mod results_file;

pub use events::{DriverEvent, ProgressCallback};
pub use executor::{RegressionDriver, RunOutcome};
pub use results_file::remove_if_exists;
