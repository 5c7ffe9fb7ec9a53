// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{AutoIgnoreError, Result};

/// Config file looked up in the repository root when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "autoignore.toml";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| AutoIgnoreError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let config: RawConfigFile =
        toml::from_str(&contents).map_err(|source| AutoIgnoreError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let raw_config = load_from_path(path)?;
    let config = ConfigFile::try_from(raw_config).map_err(|err| match err {
        AutoIgnoreError::ConfigError(msg) => {
            AutoIgnoreError::ConfigError(format!("{path:?}: {msg}"))
        }
        other => other,
    })?;
    Ok(config)
}

/// Resolve the configuration for a run rooted at `root`.
///
/// - An explicit path must exist and be valid.
/// - Otherwise `<root>/autoignore.toml` is used when present.
/// - Otherwise the built-in defaults apply.
pub fn load_for_root(root: &Path, explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        debug!(?path, "loading explicit config");
        return load_and_validate(path);
    }

    let path = default_config_path(root);
    if path.is_file() {
        debug!(?path, "loading repository config");
        load_and_validate(&path)
    } else {
        debug!("no config file; using defaults");
        Ok(ConfigFile::default())
    }
}

pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(DEFAULT_CONFIG_FILE)
}
