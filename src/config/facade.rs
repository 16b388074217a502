//! Single entry point for loading configuration.

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::WeldsheetConfig;
use config::{ConfigError, Environment, File};
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `WELDSHEET_DRAWING__PAPER_SIZE=A2`.
const ENV_PREFIX: &str = "WELDSHEET";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Lowest to highest: defaults, global file, workspace files, environment.
    pub fn load(workspace_root: &Path) -> Result<WeldsheetConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        builder
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from one explicit file, skipping file discovery.
    pub fn load_from_file(path: &Path) -> Result<WeldsheetConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}
