// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoIgnoreError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cannot read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The managed block markers in an ignore file are unbalanced.
    ///
    /// `line` is 1-based and points at the offending marker (or at the
    /// unterminated header).
    #[error("Malformed managed block in {path:?} at line {line}: {reason}")]
    MalformedBlock {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Failed to get root directory of git repository: {0}")]
    RepoRoot(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, AutoIgnoreError>;
