//! Driver configuration model

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::LoggingConfig;
use super::defaults::{
    DEFAULT_COMPARE_COMMAND, DEFAULT_REFERENCE_DIR, DEFAULT_RESULTS_FILE, DEFAULT_RUNNER_COMMAND,
    FRESH_OUTPUT_SEGMENT,
};
use crate::error::{RegressError, RegressResult};
use crate::process::CommandSpec;

/// What to do when the pipeline runner exits non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerFailurePolicy {
    /// Abort before the comparison step
    #[default]
    Stop,
    /// Log a warning and compare whatever the runner left behind
    Continue,
}

impl fmt::Display for RunnerFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunnerFailurePolicy::Stop => write!(f, "stop"),
            RunnerFailurePolicy::Continue => write!(f, "continue"),
        }
    }
}

impl FromStr for RunnerFailurePolicy {
    type Err = RegressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stop" => Ok(RunnerFailurePolicy::Stop),
            "continue" => Ok(RunnerFailurePolicy::Continue),
            other => Err(RegressError::config(format!(
                "Unknown runner failure policy '{}', expected 'stop' or 'continue'",
                other
            ))),
        }
    }
}

/// Configuration for a regression run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Directory the run happens in (defaults to the process working directory)
    #[serde(default)]
    pub work_dir: Option<PathBuf>,

    /// Where the runner writes fresh output (defaults to `<work_dir>/test_bam_in`)
    #[serde(default)]
    pub fresh_output_dir: Option<PathBuf>,

    /// Recorded reference run to compare against
    #[serde(default = "default_reference_dir")]
    pub reference_dir: PathBuf,

    /// File receiving the comparison utility's stdout
    #[serde(default = "default_results_file")]
    pub results_file: PathBuf,

    /// Pipeline runner command line
    #[serde(default = "default_runner")]
    pub runner: CommandSpec,

    /// Comparison utility command line
    #[serde(default = "default_compare")]
    pub compare: CommandSpec,

    /// Behaviour when the runner fails
    #[serde(default)]
    pub on_runner_failure: RunnerFailurePolicy,

    /// Optional JSON run summary destination
    #[serde(default)]
    pub summary_file: Option<PathBuf>,

    /// Optional replay script destination
    #[serde(default)]
    pub script_file: Option<PathBuf>,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_reference_dir() -> PathBuf {
    PathBuf::from(DEFAULT_REFERENCE_DIR)
}

fn default_results_file() -> PathBuf {
    PathBuf::from(DEFAULT_RESULTS_FILE)
}

fn default_runner() -> CommandSpec {
    CommandSpec::parse(DEFAULT_RUNNER_COMMAND).unwrap_or_else(|_| CommandSpec::new("bash"))
}

fn default_compare() -> CommandSpec {
    CommandSpec::parse(DEFAULT_COMPARE_COMMAND).unwrap_or_else(|_| CommandSpec::new("python"))
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            work_dir: None,
            fresh_output_dir: None,
            reference_dir: default_reference_dir(),
            results_file: default_results_file(),
            runner: default_runner(),
            compare: default_compare(),
            on_runner_failure: RunnerFailurePolicy::default(),
            summary_file: None,
            script_file: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Partial configuration layered on top of a [`DriverConfig`]
///
/// Produced by the environment loader and by the command line. `None`
/// leaves the underlying value untouched.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub work_dir: Option<PathBuf>,
    pub fresh_output_dir: Option<PathBuf>,
    pub reference_dir: Option<PathBuf>,
    pub results_file: Option<PathBuf>,
    pub runner: Option<CommandSpec>,
    pub compare: Option<CommandSpec>,
    pub on_runner_failure: Option<RunnerFailurePolicy>,
    pub summary_file: Option<PathBuf>,
    pub script_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

/// Absolute locations used by one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPaths {
    pub work_dir: PathBuf,
    pub fresh_output_dir: PathBuf,
    pub reference_dir: PathBuf,
    pub results_file: PathBuf,
    pub summary_file: Option<PathBuf>,
    pub script_file: Option<PathBuf>,
}

impl DriverConfig {
    /// Create a config rooted at an explicit working directory
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: Some(work_dir.into()),
            ..Default::default()
        }
    }

    /// Set the runner command
    pub fn with_runner(mut self, runner: CommandSpec) -> Self {
        self.runner = runner;
        self
    }

    /// Set the comparison command
    pub fn with_compare(mut self, compare: CommandSpec) -> Self {
        self.compare = compare;
        self
    }

    /// Set the reference directory
    pub fn with_reference_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.reference_dir = dir.into();
        self
    }

    /// Set the runner failure policy
    pub fn with_runner_failure_policy(mut self, policy: RunnerFailurePolicy) -> Self {
        self.on_runner_failure = policy;
        self
    }

    /// Write a JSON run summary to `path`
    pub fn with_summary_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.summary_file = Some(path.into());
        self
    }

    /// Write a replay script to `path`
    pub fn with_script_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.script_file = Some(path.into());
        self
    }

    /// Layer overrides on top of this config
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(dir) = overrides.work_dir {
            self.work_dir = Some(dir);
        }
        if let Some(dir) = overrides.fresh_output_dir {
            self.fresh_output_dir = Some(dir);
        }
        if let Some(dir) = overrides.reference_dir {
            self.reference_dir = dir;
        }
        if let Some(file) = overrides.results_file {
            self.results_file = file;
        }
        if let Some(runner) = overrides.runner {
            self.runner = runner;
        }
        if let Some(compare) = overrides.compare {
            self.compare = compare;
        }
        if let Some(policy) = overrides.on_runner_failure {
            self.on_runner_failure = policy;
        }
        if let Some(file) = overrides.summary_file {
            self.summary_file = Some(file);
        }
        if let Some(file) = overrides.script_file {
            self.script_file = Some(file);
        }
        self.logging.merge(LoggingConfig {
            level: overrides.log_level.unwrap_or_default(),
            format: overrides.log_format.unwrap_or_default(),
        });
    }

    /// Check the config for values that cannot produce a run
    pub fn validate(&self) -> RegressResult<()> {
        if self.reference_dir.as_os_str().is_empty() {
            return Err(RegressError::config("reference_dir must not be empty"));
        }
        if self.results_file.as_os_str().is_empty() {
            return Err(RegressError::config("results_file must not be empty"));
        }
        if self.runner.program.trim().is_empty() {
            return Err(RegressError::config("runner command must include a program"));
        }
        if self.compare.program.trim().is_empty() {
            return Err(RegressError::config("compare command must include a program"));
        }
        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => Ok(()),
            other => Err(RegressError::config(format!(
                "Unknown log format '{}', expected pretty, compact or json",
                other
            ))),
        }
    }

    /// Resolve every location against `cwd`
    ///
    /// Relative paths are joined onto the working directory. The reference
    /// directory is taken as configured and never joined.
    pub fn resolve(&self, cwd: &Path) -> ResolvedPaths {
        let work_dir = match &self.work_dir {
            Some(dir) => join_relative(cwd, dir),
            None => cwd.to_path_buf(),
        };

        let fresh_output_dir = match &self.fresh_output_dir {
            Some(dir) => join_relative(&work_dir, dir),
            None => work_dir.join(FRESH_OUTPUT_SEGMENT),
        };

        ResolvedPaths {
            fresh_output_dir,
            reference_dir: self.reference_dir.clone(),
            results_file: join_relative(&work_dir, &self.results_file),
            summary_file: self.summary_file.as_ref().map(|f| join_relative(&work_dir, f)),
            script_file: self.script_file.as_ref().map(|f| join_relative(&work_dir, f)),
            work_dir,
        }
    }
}

fn join_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
