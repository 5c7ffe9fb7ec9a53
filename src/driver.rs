// src/driver.rs

//! Runs the whole reconciliation over a tree and collects the outcome.

use std::io::Write;
use std::path::Path;

use tracing::{error, info};

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::predicate::PredicateFactory;
use crate::scope::{Finalized, Scope, ScopeFailure, ScopeReport, WriteMode};
use crate::walker::{walk, WalkOptions};

/// Exit status: no ignore file changed.
pub const EXIT_CLEAN: u8 = 0;
/// Exit status: at least one managed block changed.
pub const EXIT_CHANGED: u8 = 1;
/// Exit status: fatal error, or at least one scope could not be processed.
pub const EXIT_ERROR: u8 = 2;

#[derive(Debug, Default)]
pub struct RunSummary {
    /// One report per successfully processed scope, in walk order.
    pub reports: Vec<ScopeReport>,
    pub failures: Vec<ScopeFailure>,
}

impl RunSummary {
    /// True when any scope's managed block changed.
    pub fn changed(&self) -> bool {
        self.reports.iter().any(ScopeReport::changed)
    }

    pub fn exit_code(&self) -> u8 {
        if !self.failures.is_empty() {
            EXIT_ERROR
        } else if self.changed() {
            EXIT_CHANGED
        } else {
            EXIT_CLEAN
        }
    }
}

/// Walk `root`, reconcile and finalize every scope, print one report per
/// scope to `out`.
///
/// Scope-level problems end up in [`RunSummary::failures`]; only an
/// unreadable root or a broken `out` is returned as an error.
pub fn reconcile_tree(
    fs: &dyn FileSystem,
    root: &Path,
    config: &ConfigFile,
    factory: &dyn PredicateFactory,
    mode: WriteMode,
    out: &mut dyn Write,
) -> Result<RunSummary> {
    let opts = WalkOptions::new(root, config.ignore_file(), config.metadata_dir());
    let walked = walk(fs, root, &opts)?;

    let mut summary = RunSummary {
        failures: walked.failures,
        ..RunSummary::default()
    };

    for scope in walked.scopes {
        let ignore_path = scope.ignore_path().to_path_buf();
        match process_scope(scope, fs, factory, mode) {
            Ok(report) => {
                writeln!(out, "{report}")?;
                summary.reports.push(report);
            }
            Err(error) => {
                error!(path = ?ignore_path, %error, "scope failed");
                summary.failures.push(ScopeFailure { ignore_path, error });
            }
        }
    }

    for failure in &summary.failures {
        writeln!(out, "{}:\n\tError: {}", failure.ignore_path.display(), failure.error)?;
    }

    info!(
        scopes = summary.reports.len(),
        failures = summary.failures.len(),
        changed = summary.changed(),
        "run complete"
    );
    Ok(summary)
}

/// Reconcile then finalize one scope. Finalize runs even when no predicate
/// could be built for the scope.
fn process_scope(
    mut scope: Scope,
    fs: &dyn FileSystem,
    factory: &dyn PredicateFactory,
    mode: WriteMode,
) -> Result<ScopeReport> {
    let reconciled = factory
        .for_scope(scope.root())
        .map(|predicate| scope.reconcile(&*predicate));

    let finalized = scope.finalize(fs, mode);

    let report = reconciled?;
    if finalized? == Finalized::Skipped && report.changed() {
        info!(path = ?report.ignore_path, "check mode: changes not written");
    }
    Ok(report)
}
