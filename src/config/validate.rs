// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{AutoIgnoreError, Result};
use crate::predicate::build_globset;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::AutoIgnoreError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.predicate))
    }
}

/// Check a raw config without converting it.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_file_name("[config].ignore_file", &cfg.config.ignore_file)?;
    validate_file_name("[config].metadata_dir", &cfg.config.metadata_dir)?;
    validate_predicate(cfg)?;
    Ok(())
}

/// Both names are looked up directly inside a directory, so they must be a
/// single plain path component.
fn validate_file_name(key: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AutoIgnoreError::ConfigError(format!("{key} must not be empty")));
    }
    if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        return Err(AutoIgnoreError::ConfigError(format!(
            "{key} must be a plain file name, got {name:?}"
        )));
    }
    Ok(())
}

fn validate_predicate(cfg: &RawConfigFile) -> Result<()> {
    let predicate = &cfg.predicate;

    if !predicate.symlinks && predicate.patterns.is_empty() {
        return Err(AutoIgnoreError::ConfigError(
            "[predicate] disables symlinks and has no patterns; nothing would ever be ignored"
                .to_string(),
        ));
    }

    build_globset(&predicate.patterns)
        .map_err(|e| AutoIgnoreError::ConfigError(format!("[predicate].patterns: {e:#}")))?;

    Ok(())
}
