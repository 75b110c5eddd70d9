//! File-based configuration loading

use std::fs;
use std::path::Path;

use super::DriverConfig;
use crate::error::{RegressError, RegressResult};

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> RegressResult<DriverConfig> {
    if !path.exists() {
        return Ok(DriverConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        RegressError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    let config: DriverConfig = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| {
            RegressError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
            RegressError::config_with_context(
                format!("Failed to parse YAML config: {}", e),
                format!("Deserializing YAML configuration from '{}'", path.display()),
            )
        })?,
        _ => serde_json::from_str(&content).map_err(|e| {
            RegressError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
    };

    Ok(config)
}

/// Serialize a configuration in the format implied by `path`'s extension
pub fn render_for_path(config: &DriverConfig, path: &Path) -> RegressResult<String> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::to_string_pretty(config)
            .map_err(|e| RegressError::config(format!("Failed to serialize TOML config: {}", e))),
        Some("yaml") | Some("yml") => serde_yaml::to_string(config)
            .map_err(|e| RegressError::config(format!("Failed to serialize YAML config: {}", e))),
        _ => serde_json::to_string_pretty(config)
            .map_err(|e| RegressError::config(format!("Failed to serialize JSON config: {}", e))),
    }
}
