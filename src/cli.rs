// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `autoignore`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "autoignore",
    version,
    about = "Keep an auto-managed block of every .gitignore in sync with the symlinks in the tree.",
    long_about = "Walks the git working tree, and for every directory owning an ignore file \
                  recomputes the block between `# [BEGIN AUTO IGNORE]` and \
                  `# [END AUTO IGNORE]`. Exits 0 when nothing changed, 1 when at least one \
                  file changed, 2 on errors."
)]
pub struct CliArgs {
    /// Repository root to scan.
    ///
    /// Default: the output of `git rev-parse --show-toplevel`.
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Path to the config file (TOML).
    ///
    /// Default: `autoignore.toml` in the repository root, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report what would change without rewriting any ignore file.
    #[arg(long)]
    pub check: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `AUTOIGNORE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
