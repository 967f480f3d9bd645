//! TOML config loading.

use std::path::Path;

use log::info;

use crate::schema::SceneConfig;
use crate::validation;
use crate::ConfigError;

/// Load and validate config from a specific TOML file path.
///
/// Missing fields take serde defaults. Unlike a live-reload setting, an
/// invalid file is an error: the scene cannot be built from it.
pub fn load_from_path(path: &Path) -> Result<SceneConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;

    let config = from_toml_str(&content)?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Parse and validate config from TOML text.
pub fn from_toml_str(content: &str) -> Result<SceneConfig, ConfigError> {
    let config: SceneConfig = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load from `path` when given, otherwise use the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<SceneConfig, ConfigError> {
    match path {
        Some(path) => load_from_path(path),
        None => {
            info!("no config file given, using defaults");
            Ok(SceneConfig::default())
        }
    }
}

/// Render `config` as TOML.
pub fn config_to_toml(config: &SceneConfig) -> String {
    // Plain structs of numbers, strings and enums always serialize.
    toml::to_string_pretty(config).unwrap_or_default()
}

/// The default config rendered as TOML, suitable as a starting file.
pub fn default_config_toml() -> String {
    config_to_toml(&SceneConfig::default())
}
