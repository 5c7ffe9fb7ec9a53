// src/lib.rs

pub mod block;
pub mod cli;
pub mod config;
pub mod driver;
pub mod errors;
pub mod fs;
pub mod git;
pub mod logging;
pub mod paths;
pub mod predicate;
pub mod scope;
pub mod walker;

use std::io;
use std::sync::Arc;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::load_for_root;
use crate::driver::{reconcile_tree, RunSummary};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::predicate::ConfiguredPredicateFactory;
use crate::scope::WriteMode;

pub use crate::driver::{EXIT_CHANGED, EXIT_CLEAN, EXIT_ERROR};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - repository root resolution (`--root` or git)
/// - config loading
/// - the predicate factory
/// - the walk / reconcile / write-back pass, reporting to stdout
pub fn run(args: CliArgs) -> Result<RunSummary> {
    let root = match args.root {
        Some(root) => root,
        None => git::show_toplevel(&std::env::current_dir()?)?,
    };
    debug!(?root, check = args.check, "starting run");

    let config = load_for_root(&root, args.config.as_deref())?;

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let factory = ConfiguredPredicateFactory::new(Arc::clone(&fs), config.predicate_section())?;

    let mode = if args.check {
        WriteMode::DryRun
    } else {
        WriteMode::Write
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    reconcile_tree(fs.as_ref(), &root, &config, &factory, mode, &mut out)
}
