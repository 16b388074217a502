//! Global config file source: $XDG_CONFIG_HOME/weldsheet/config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Path to the user-level config file, if a home directory can be resolved.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "weldsheet").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global config file to the builder when it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(path) = global_config_path() else {
        return Ok(builder);
    };
    if !path.exists() {
        debug!(config_path = %path.display(), "No global configuration file");
        return Ok(builder);
    }
    let path = dunce::canonicalize(&path).unwrap_or(path);
    Ok(builder.add_source(File::from(path).required(false)))
}
