//! Locates and reads the TOML configuration file.

use super::file::ConfigFile;
use crate::core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the API key from the file.
pub const API_KEY_ENV_VAR: &str = "MAILBOX_LAYER_API_KEY";

const LOCAL_CONFIG_FILE: &str = "mailbox-layer.toml";

/// Candidate file locations, in lookup order.
fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Ok(home) = std::env::var("HOME") {
        paths.push(
            PathBuf::from(home)
                .join(".config")
                .join("mailbox-layer")
                .join("config.toml"),
        );
    }
    paths
}

/// Loads the configuration file.
///
/// An explicit `path` must exist. Without one, the default locations are
/// tried in order and a missing file yields an empty [`ConfigFile`].
///
/// # Returns
/// * The parsed file and the path it was read from, if any.
pub fn load_config_file(path: Option<&Path>) -> Result<(ConfigFile, Option<String>)> {
    if let Some(path) = path {
        let file = read_config_file(path)?;
        return Ok((file, Some(path.display().to_string())));
    }

    for candidate in default_config_paths() {
        if candidate.is_file() {
            let file = read_config_file(&candidate)?;
            return Ok((file, Some(candidate.display().to_string())));
        }
    }

    tracing::debug!(target: "mailbox_layer::config", "No configuration file found, using defaults");
    Ok((ConfigFile::default(), None))
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    tracing::debug!(target: "mailbox_layer::config", "Reading configuration from {}", path.display());
    let raw = fs::read_to_string(path)?;
    let file: ConfigFile = toml::from_str(&raw)?;
    tracing::info!(target: "mailbox_layer::config", "Loaded configuration from {}", path.display());
    Ok(file)
}

/// API key from the environment, ignoring blank values.
pub(crate) fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV_VAR)
        .ok()
        .filter(|key| !key.trim().is_empty())
}
