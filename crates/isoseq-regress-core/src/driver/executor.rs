//! Regression driver execution

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::events::{DriverEvent, ProgressCallback, print_to_stdout};
use super::remove_if_exists;
use crate::config::{DriverConfig, ResolvedPaths, RunnerFailurePolicy};
use crate::error::{RegressError, RegressResult, ResultExt};
use crate::process::{StepRecord, run_inherited, run_to_file};
use crate::report::{JsonReporter, RunSummary, write_replay_script};

/// Status a shell reports for a command it could not run
const COMMAND_NOT_FOUND_STATUS: i32 = 127;

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub paths: ResolvedPaths,
    pub runner: StepRecord,
    pub comparison: StepRecord,
}

impl RunOutcome {
    /// Exit status of the comparison utility, as printed on the console
    pub fn comparison_status(&self) -> i32 {
        self.comparison.status
    }
}

/// Runs the pipeline, then compares its output against the reference run
pub struct RegressionDriver {
    /// Configuration
    config: DriverConfig,

    /// Progress callback
    progress_callback: ProgressCallback,
}

impl RegressionDriver {
    /// Create a driver that prints its status lines to stdout
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            progress_callback: Box::new(print_to_stdout),
        }
    }

    /// Replace the progress callback
    pub fn set_progress_callback(&mut self, callback: ProgressCallback) {
        self.progress_callback = callback;
    }

    /// Run from the process working directory
    pub async fn run(&self) -> RegressResult<RunOutcome> {
        let cwd = std::env::current_dir().map_err(|e| {
            RegressError::io(format!("Failed to determine current directory: {}", e))
        })?;
        self.run_in(&cwd).await
    }

    /// Run with `cwd` standing in for the process working directory
    #[instrument(skip_all, fields(cwd = %cwd.display()))]
    pub async fn run_in(&self, cwd: &Path) -> RegressResult<RunOutcome> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let paths = self.config.resolve(cwd);

        info!(
            %run_id,
            fresh_output_dir = %paths.fresh_output_dir.display(),
            reference_dir = %paths.reference_dir.display(),
            results_file = %paths.results_file.display(),
            "starting regression run"
        );

        remove_if_exists(&paths.results_file)
            .await
            .context("Clearing results before the pipeline run")?;

        if let Some(script_file) = &paths.script_file {
            write_replay_script(script_file, &self.config.runner, &self.config.compare, &paths)
                .await?;
        }

        let runner = self.run_pipeline(&paths).await?;
        self.emit(DriverEvent::RunnerFinished(runner.clone()));

        self.emit(DriverEvent::Comparing {
            fresh_output_dir: paths.fresh_output_dir.clone(),
            reference_dir: paths.reference_dir.clone(),
        });

        // Second clear right before the redirect; the first one ran before the pipeline.
        remove_if_exists(&paths.results_file)
            .await
            .context("Clearing results before the comparison")?;

        let comparison = self.run_comparison(&paths).await?;
        self.emit(DriverEvent::ComparisonFinished(comparison.clone()));

        let outcome = RunOutcome {
            run_id,
            started_at,
            finished_at: Utc::now(),
            paths,
            runner,
            comparison,
        };

        if let Some(summary_file) = &outcome.paths.summary_file {
            let results_bytes = tokio::fs::metadata(&outcome.paths.results_file)
                .await
                .map(|m| m.len())
                .map_err(|e| {
                    RegressError::io_with_path(
                        format!("Failed to read results file metadata: {}", e),
                        &outcome.paths.results_file,
                    )
                })?;
            let summary = RunSummary::from_outcome(&outcome, results_bytes);
            JsonReporter::write(&summary, summary_file).await?;
        }

        info!(
            %run_id,
            comparison_status = outcome.comparison.status,
            "regression run finished"
        );
        Ok(outcome)
    }

    async fn run_pipeline(&self, paths: &ResolvedPaths) -> RegressResult<StepRecord> {
        info!(runner = %self.config.runner, "running pipeline");
        let trailing = [paths.fresh_output_dir.clone()];
        let record = match run_inherited(&self.config.runner, &trailing, &paths.work_dir).await {
            Ok(record) => record,
            Err(e @ RegressError::Spawn { .. })
                if self.config.on_runner_failure == RunnerFailurePolicy::Continue =>
            {
                warn!(error = %e, "pipeline runner could not be started");
                StepRecord {
                    command: self.config.runner.render_with(&[fresh_output_arg(paths)]),
                    exit_code: None,
                    status: COMMAND_NOT_FOUND_STATUS,
                    duration_ms: 0,
                }
            }
            Err(e) => return Err(e),
        };

        if record.succeeded() {
            info!(duration_ms = record.duration_ms, "pipeline finished");
            return Ok(record);
        }

        match self.config.on_runner_failure {
            RunnerFailurePolicy::Stop => {
                Err(RegressError::runner_failed(&record.command, record.status))
            }
            RunnerFailurePolicy::Continue => {
                warn!(
                    status = record.status,
                    command = %record.command,
                    "pipeline runner failed, comparing whatever it produced"
                );
                Ok(record)
            }
        }
    }

    async fn run_comparison(&self, paths: &ResolvedPaths) -> RegressResult<StepRecord> {
        info!(compare = %self.config.compare, "comparing runs");
        let trailing: [PathBuf; 2] = [
            paths.fresh_output_dir.clone(),
            paths.reference_dir.clone(),
        ];
        run_to_file(
            &self.config.compare,
            &trailing,
            &paths.work_dir,
            &paths.results_file,
        )
        .await
    }

    fn emit(&self, event: DriverEvent) {
        (self.progress_callback)(&event);
    }
}

fn fresh_output_arg(paths: &ResolvedPaths) -> String {
    paths.fresh_output_dir.to_string_lossy().into_owned()
}
