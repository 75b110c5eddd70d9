//! Iso-Seq regression driver
//!
//! Runs the transcript pipeline on the BAM-input regression dataset through
//! an external runner, then compares the fresh output against a recorded
//! bax.h5-input reference run with an external comparison utility. The
//! comparison report lands in a results file and its exit status is echoed
//! to the console.
//!
//! # Example
//!
//! ```rust,ignore
//! use isoseq_regress_core::{DriverConfig, RegressionDriver};
//!
//! let driver = RegressionDriver::new(DriverConfig::default());
//! let outcome = driver.run().await?;
//! println!("comparison exited with {}", outcome.comparison_status());
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod process;
pub mod report;

// Re-exports for convenience
pub use config::{ConfigOverrides, DriverConfig, ResolvedPaths, RunnerFailurePolicy};
pub use driver::{DriverEvent, ProgressCallback, RegressionDriver, RunOutcome};
pub use error::{RegressError, RegressResult};
pub use process::{CommandSpec, StepRecord};
pub use report::{JsonReporter, RunSummary};
