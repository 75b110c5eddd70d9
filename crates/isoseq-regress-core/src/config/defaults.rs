//! Built-in defaults and the top-level loading entry point

use std::path::Path;

use super::{ConfigOverrides, DriverConfig, load_from_env, load_from_file};
use crate::error::RegressResult;

/// Segment appended to the working directory to form the fresh-output directory.
pub const FRESH_OUTPUT_SEGMENT: &str = "test_bam_in";

/// Location of the recorded bax.h5-input reference run.
pub const DEFAULT_REFERENCE_DIR: &str =
    "/pbi/dept/secondary/siv/testdata/pbtranscript-unittest/data/regression/test_bax_in/";

/// Results file, relative to the working directory.
pub const DEFAULT_RESULTS_FILE: &str = "results.txt";

/// Runs the pipeline on the BAM dataset; receives the output directory as its last argument.
pub const DEFAULT_RUNNER_COMMAND: &str = "bash run_isoseq_bam_in.sh";

/// Compares two run directories and prints a report on stdout.
pub const DEFAULT_COMPARE_COMMAND: &str = "python -m pbtranscript.testkit.compare_isoseq_runs";

/// Default configuration file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "isoseq_regress.json";

/// Load configuration from file, environment and command-line overrides
///
/// A missing config file yields the defaults. Environment values override
/// the file; `cli` overrides everything.
pub fn load_config(config_file: &Path, cli: ConfigOverrides) -> RegressResult<DriverConfig> {
    let mut config = load_from_file(config_file)?;
    config.apply(load_from_env()?);
    config.apply(cli);
    config.validate()?;

    tracing::debug!(config_file = %config_file.display(), "loaded driver configuration");
    Ok(config)
}
