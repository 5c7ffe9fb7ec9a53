// src/config/mod.rs

//! Configuration loading and validation for autoignore.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate file names and predicate globs (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_for_root, load_from_path, DEFAULT_CONFIG_FILE};
pub use model::{ConfigFile, ConfigSection, PredicateSection, RawConfigFile};
pub use validate::validate_config;
