//! Configuration management commands

use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::*;
use isoseq_regress_core::config::{load_config, render_for_path};
use isoseq_regress_core::{ConfigOverrides, DriverConfig, ResolvedPaths};

use crate::console::CliConsole;

/// Show the effective configuration
pub async fn show(config_file: &Path, overrides: ConfigOverrides) -> Result<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration");

    if config_file.exists() {
        console.success(&format!("Loaded configuration from: {}", config_file.display()));
    } else {
        console.warn(&format!(
            "Configuration file not found: {}",
            config_file.display()
        ));
        console.info("Using default configuration");
    }

    let config = load_config(config_file, overrides)?;
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    print_config(&console, &config, &config.resolve(&cwd));
    Ok(())
}

/// Validate configuration and the directories a run depends on
pub async fn validate(config_file: &Path, overrides: ConfigOverrides) -> Result<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration Validation");

    let config = match load_config(config_file, overrides) {
        Ok(config) => {
            console.success("Configuration is valid");
            config
        }
        Err(e) => {
            console.error(&format!("Configuration validation failed: {e}"));
            return Err(e.into());
        }
    };

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let paths = config.resolve(&cwd);

    if !paths.work_dir.is_dir() {
        bail!("Working directory does not exist: {}", paths.work_dir.display());
    }
    console.success(&format!("Working directory: {}", paths.work_dir.display()));

    if paths.reference_dir.is_dir() {
        console.success(&format!(
            "Reference run found: {}",
            paths.reference_dir.display()
        ));
    } else {
        console.warn(&format!(
            "Reference run not found: {}",
            paths.reference_dir.display()
        ));
    }

    if paths.fresh_output_dir.exists() {
        console.info(&format!(
            "Fresh output directory already exists and will be reused: {}",
            paths.fresh_output_dir.display()
        ));
    }

    Ok(())
}

/// Initialize a new configuration file
pub async fn init(config_file: &Path, force: bool) -> Result<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration Initialization");

    if config_file.exists() && !force {
        console.error(&format!(
            "Configuration file already exists: {}",
            config_file.display()
        ));
        console.info("Use --force to overwrite");
        bail!("Configuration file already exists");
    }

    let rendered = render_for_path(&DriverConfig::default(), config_file)?;
    tokio::fs::write(config_file, rendered)
        .await
        .with_context(|| format!("Failed to write {}", config_file.display()))?;

    console.success(&format!(
        "Created configuration file: {}",
        config_file.display()
    ));
    Ok(())
}

fn print_config(console: &CliConsole, config: &DriverConfig, paths: &ResolvedPaths) {
    console.info(&format!(
        "Working Directory: {}",
        paths.work_dir.display().to_string().cyan()
    ));
    console.info(&format!(
        "Fresh Output: {}",
        paths.fresh_output_dir.display().to_string().cyan()
    ));
    console.info(&format!(
        "Reference Run: {}",
        paths.reference_dir.display().to_string().cyan()
    ));
    console.info(&format!(
        "Results File: {}",
        paths.results_file.display().to_string().cyan()
    ));

    console.print_header("Collaborators");
    console.info(&format!("Runner: {}", config.runner.to_string().green()));
    console.info(&format!("Compare: {}", config.compare.to_string().green()));
    console.info(&format!(
        "On Runner Failure: {}",
        config.on_runner_failure.to_string().yellow()
    ));

    console.print_header("Outputs");
    let optional = |path: &Option<std::path::PathBuf>| match path {
        Some(p) => p.display().to_string(),
        None => "disabled".to_string(),
    };
    console.info(&format!("Summary: {}", optional(&paths.summary_file)));
    console.info(&format!("Replay Script: {}", optional(&paths.script_file)));
    console.info(&format!(
        "Logging: {} ({})",
        config.logging.level, config.logging.format
    ));
}
