//! The default command: one regression run

use anyhow::Result;
use isoseq_regress_core::{DriverConfig, RegressionDriver};

/// Run the pipeline and the comparison
///
/// Succeeds whenever the sequence completes. The comparison status has
/// already been printed by the driver and does not affect the exit code.
pub async fn execute(config: DriverConfig) -> Result<()> {
    let driver = RegressionDriver::new(config);
    let outcome = driver.run().await?;

    tracing::debug!(
        runner_status = outcome.runner.status,
        comparison_status = outcome.comparison_status(),
        results_file = %outcome.paths.results_file.display(),
        "run complete"
    );
    Ok(())
}
