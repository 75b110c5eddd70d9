//! JSON run summary

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ResolvedPaths;
use crate::driver::RunOutcome;
use crate::error::{RegressError, RegressResult};
use crate::process::StepRecord;

/// Serializable record of one regression run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Version of the driver that produced this summary
    pub driver_version: String,
    pub paths: ResolvedPaths,
    pub runner: StepRecord,
    pub comparison: StepRecord,
    /// Size of the results file when the run finished
    pub results_bytes: u64,
}

impl RunSummary {
    /// Build a summary from a finished run
    pub fn from_outcome(outcome: &RunOutcome, results_bytes: u64) -> Self {
        Self {
            run_id: outcome.run_id,
            started_at: outcome.started_at,
            finished_at: outcome.finished_at,
            driver_version: env!("CARGO_PKG_VERSION").to_string(),
            paths: outcome.paths.clone(),
            runner: outcome.runner.clone(),
            comparison: outcome.comparison.clone(),
            results_bytes,
        }
    }
}

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generate a JSON report
    pub fn generate(summary: &RunSummary) -> RegressResult<String> {
        let json = serde_json::to_string_pretty(summary)?;
        Ok(json)
    }

    /// Write the report to `path`
    pub async fn write(summary: &RunSummary, path: &Path) -> RegressResult<()> {
        let json = Self::generate(summary)?;
        tokio::fs::write(path, json).await.map_err(|e| {
            RegressError::io_with_path(format!("Failed to write run summary: {}", e), path)
        })?;
        tracing::debug!(path = %path.display(), "wrote run summary");
        Ok(())
    }
}
