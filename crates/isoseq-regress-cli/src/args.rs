//! CLI argument definitions using clap
//!
//! - isoseq-regress                  # run with defaults
//! - isoseq-regress --work-dir DIR   # run somewhere else
//! - isoseq-regress config show      # utility commands

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use isoseq_regress_core::config::DEFAULT_CONFIG_FILE;
use isoseq_regress_core::{CommandSpec, ConfigOverrides, RegressResult, RunnerFailurePolicy};

#[derive(Parser)]
#[command(name = "isoseq-regress")]
#[command(
    about = "Run the Iso-Seq pipeline on BAM input and compare it against the bax.h5 reference run"
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (JSON, TOML or YAML)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    /// Directory to run in (defaults to the current directory)
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Where the runner writes fresh output (defaults to <work-dir>/test_bam_in)
    #[arg(long)]
    pub fresh_output_dir: Option<PathBuf>,

    /// Recorded reference run to compare against
    #[arg(long)]
    pub reference_dir: Option<PathBuf>,

    /// File receiving the comparison report
    #[arg(long)]
    pub results_file: Option<PathBuf>,

    /// Pipeline runner command; the output directory is appended
    #[arg(long)]
    pub runner: Option<String>,

    /// Comparison command; fresh and reference directories are appended
    #[arg(long)]
    pub compare: Option<String>,

    /// What to do when the runner exits non-zero
    #[arg(long, value_enum)]
    pub on_runner_failure: Option<RunnerFailureArg>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Write a bash script replaying this run to this path
    #[arg(long)]
    pub emit_script: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format on stderr
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration and resolved paths
    Show,

    /// Validate configuration and the directories a run depends on
    Validate,

    /// Create a new configuration file with defaults
    Init {
        /// Overwrite existing file without prompting
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RunnerFailureArg {
    Stop,
    Continue,
}

impl From<RunnerFailureArg> for RunnerFailurePolicy {
    fn from(arg: RunnerFailureArg) -> Self {
        match arg {
            RunnerFailureArg::Stop => RunnerFailurePolicy::Stop,
            RunnerFailureArg::Continue => RunnerFailurePolicy::Continue,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl LogFormatArg {
    fn as_str(self) -> &'static str {
        match self {
            LogFormatArg::Pretty => "pretty",
            LogFormatArg::Compact => "compact",
            LogFormatArg::Json => "json",
        }
    }
}

impl Cli {
    /// Overrides expressed on the command line
    pub fn overrides(&self) -> RegressResult<ConfigOverrides> {
        Ok(ConfigOverrides {
            work_dir: self.work_dir.clone(),
            fresh_output_dir: self.fresh_output_dir.clone(),
            reference_dir: self.reference_dir.clone(),
            results_file: self.results_file.clone(),
            runner: self.runner.as_deref().map(CommandSpec::parse).transpose()?,
            compare: self.compare.as_deref().map(CommandSpec::parse).transpose()?,
            on_runner_failure: self.on_runner_failure.map(Into::into),
            summary_file: self.summary.clone(),
            script_file: self.emit_script.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format.map(|f| f.as_str().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_is_a_run() {
        let cli = Cli::parse_from(["isoseq-regress"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config_file, PathBuf::from(DEFAULT_CONFIG_FILE));

        let overrides = cli.overrides().unwrap();
        assert!(overrides.runner.is_none());
        assert!(overrides.work_dir.is_none());
    }

    #[test]
    fn test_overrides_from_flags() {
        let cli = Cli::parse_from([
            "isoseq-regress",
            "--compare",
            "diff -r",
            "--on-runner-failure",
            "continue",
            "--log-format",
            "json",
        ]);
        let overrides = cli.overrides().unwrap();

        assert_eq!(overrides.compare.unwrap().argv(), vec!["diff", "-r"]);
        assert_eq!(
            overrides.on_runner_failure,
            Some(RunnerFailurePolicy::Continue)
        );
        assert_eq!(overrides.log_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_invalid_command_flag_is_rejected() {
        let cli = Cli::parse_from(["isoseq-regress", "--runner", "bash run.sh; rm -rf x"]);
        assert!(cli.overrides().is_err());
    }

    #[test]
    fn test_config_subcommand_accepts_global_config_file() {
        let cli = Cli::parse_from(["isoseq-regress", "config", "show", "--config-file", "x.toml"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Show
            })
        ));
        assert_eq!(cli.config_file, PathBuf::from("x.toml"));
    }
}
