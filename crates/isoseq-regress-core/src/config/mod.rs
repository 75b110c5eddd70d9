//! Configuration management for the regression driver
//!
//! Configuration is layered, lowest precedence first: built-in defaults,
//! an optional config file (JSON, TOML or YAML), `ISOSEQ_REGRESS_*`
//! environment variables, then explicit overrides from the command line.

mod defaults;
mod driver_config;
mod env_loader;
mod file_loader;
mod logging_config;

pub use defaults::{
    DEFAULT_COMPARE_COMMAND, DEFAULT_CONFIG_FILE, DEFAULT_REFERENCE_DIR, DEFAULT_RESULTS_FILE,
    DEFAULT_RUNNER_COMMAND, FRESH_OUTPUT_SEGMENT, load_config,
};
pub use driver_config::{ConfigOverrides, DriverConfig, ResolvedPaths, RunnerFailurePolicy};
pub use env_loader::{load_from_env, load_from_lookup};
pub use file_loader::{load_from_file, render_for_path};
pub use logging_config::LoggingConfig;
