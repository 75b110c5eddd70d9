//! Command routing logic for CLI

use anyhow::Result;
use isoseq_regress_core::config::{LoggingConfig, load_config};

use crate::args::{Cli, Commands, ConfigAction};
use crate::{commands, logging};

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> Result<()> {
    let overrides = cli.overrides()?;

    if let Some(Commands::Config { action }) = &cli.command {
        let mut logging_config = LoggingConfig::default();
        logging_config.merge(LoggingConfig {
            level: overrides.log_level.clone().unwrap_or_default(),
            format: overrides.log_format.clone().unwrap_or_default(),
        });
        logging::init(&logging_config)?;

        return match action {
            ConfigAction::Show => commands::config::show(&cli.config_file, overrides).await,
            ConfigAction::Validate => commands::config::validate(&cli.config_file, overrides).await,
            ConfigAction::Init { force } => commands::config::init(&cli.config_file, *force).await,
        };
    }

    let config = load_config(&cli.config_file, overrides)?;
    logging::init(&config.logging)?;
    commands::run::execute(config).await
}
