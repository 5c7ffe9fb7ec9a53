// src/config/model.rs

use serde::Deserialize;

/// Name of the per-directory ignore-rules file.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";
/// Version-control metadata directory pruned from the walk.
pub const DEFAULT_METADATA_DIR: &str = ".git";

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// ignore_file = ".gitignore"
/// metadata_dir = ".git"
///
/// [predicate]
/// symlinks = true
/// patterns = ["**/*.generated.rs"]
/// ```
///
/// All sections are optional and have reasonable defaults. This is the
/// unchecked form; turn it into a [`ConfigFile`] with `try_from`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub predicate: PredicateSection,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// File name looked up in every directory, `.gitignore` by default.
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Directory directly under the root that is never descended into.
    #[serde(default = "default_metadata_dir")]
    pub metadata_dir: String,
}

fn default_ignore_file() -> String {
    DEFAULT_IGNORE_FILE.to_string()
}

fn default_metadata_dir() -> String {
    DEFAULT_METADATA_DIR.to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            ignore_file: default_ignore_file(),
            metadata_dir: default_metadata_dir(),
        }
    }
}

/// `[predicate]` section: which paths belong in the managed block.
///
/// The effective predicate is the union of the enabled parts.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredicateSection {
    /// Ignore symbolic links (default `true`).
    #[serde(default = "default_symlinks")]
    pub symlinks: bool,

    /// Additional globs, matched against scope-relative paths such as
    /// `gen/out.rs`.
    #[serde(default)]
    pub patterns: Vec<String>,
}

fn default_symlinks() -> bool {
    true
}

impl Default for PredicateSection {
    fn default() -> Self {
        Self {
            symlinks: default_symlinks(),
            patterns: Vec::new(),
        }
    }
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    config: ConfigSection,
    predicate: PredicateSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, predicate: PredicateSection) -> Self {
        Self { config, predicate }
    }

    pub fn config_section(&self) -> &ConfigSection {
        &self.config
    }

    pub fn predicate_section(&self) -> &PredicateSection {
        &self.predicate
    }

    pub fn ignore_file(&self) -> &str {
        &self.config.ignore_file
    }

    pub fn metadata_dir(&self) -> &str {
        &self.config.metadata_dir
    }
}

impl Default for ConfigFile {
    /// The built-in defaults are valid by construction.
    fn default() -> Self {
        Self::new_unchecked(ConfigSection::default(), PredicateSection::default())
    }
}
