// src/predicate.rs

//! Ignore predicates: "should this path end up in the managed block?".
//!
//! A predicate is built per scope through a [`PredicateFactory`], so that
//! implementations can interpret paths relative to the directory owning the
//! ignore file. Predicates never fail: a filesystem error while looking at a
//! path means "do not ignore", logged at `warn`.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{trace, warn};

use crate::config::PredicateSection;
use crate::fs::{EntryKind, FileSystem};
use crate::paths::entry_for;

/// Decides whether a single path should be ignored.
pub trait IgnorePredicate: fmt::Debug {
    fn ignore(&self, path: &Path) -> bool;
}

/// Builds the predicate used for one scope.
pub trait PredicateFactory: fmt::Debug {
    fn for_scope(&self, scope_root: &Path) -> Result<Box<dyn IgnorePredicate>>;
}

/// Default predicate: the path itself is a symbolic link (not followed).
#[derive(Debug, Clone)]
pub struct SymlinkPredicate {
    fs: Arc<dyn FileSystem>,
}

impl SymlinkPredicate {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl IgnorePredicate for SymlinkPredicate {
    fn ignore(&self, path: &Path) -> bool {
        match self.fs.entry_kind(path) {
            Ok(kind) => kind == EntryKind::Symlink,
            Err(err) => not_ignored_on_error(path, &err),
        }
    }
}

/// Ignores existing paths whose scope-relative form matches a glob.
///
/// Patterns are matched against the path without its leading slash, e.g.
/// `gen/out.rs` for `<scope root>/gen/out.rs`. `*` does not cross `/`.
#[derive(Clone)]
pub struct GlobPredicate {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    set: GlobSet,
}

impl fmt::Debug for GlobPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobPredicate")
            .field("root", &self.root)
            .field("patterns", &self.set.len())
            .finish_non_exhaustive()
    }
}

impl GlobPredicate {
    pub fn new(fs: Arc<dyn FileSystem>, scope_root: &Path, set: GlobSet) -> Self {
        Self {
            fs,
            root: scope_root.to_path_buf(),
            set,
        }
    }
}

impl IgnorePredicate for GlobPredicate {
    fn ignore(&self, path: &Path) -> bool {
        let Some(entry) = entry_for(&self.root, path) else {
            return false;
        };
        if !self.set.is_match(entry.trim_start_matches('/')) {
            return false;
        }
        match self.fs.entry_kind(path) {
            Ok(_) => true,
            Err(err) => not_ignored_on_error(path, &err),
        }
    }
}

/// True when any member is true. Empty means "ignore nothing".
#[derive(Debug, Default)]
pub struct AnyPredicate {
    members: Vec<Box<dyn IgnorePredicate>>,
}

impl AnyPredicate {
    pub fn new(members: Vec<Box<dyn IgnorePredicate>>) -> Self {
        Self { members }
    }
}

impl IgnorePredicate for AnyPredicate {
    fn ignore(&self, path: &Path) -> bool {
        self.members.iter().any(|p| p.ignore(path))
    }
}

fn not_ignored_on_error(path: &Path, err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::NotFound {
        trace!(?path, "path vanished; not ignored");
    } else {
        warn!(?path, error = %err, "cannot inspect path; treating it as not ignored");
    }
    false
}

/// Factory driven by the `[predicate]` config section.
#[derive(Debug, Clone)]
pub struct ConfiguredPredicateFactory {
    fs: Arc<dyn FileSystem>,
    symlinks: bool,
    globs: Option<GlobSet>,
}

impl ConfiguredPredicateFactory {
    pub fn new(fs: Arc<dyn FileSystem>, section: &PredicateSection) -> Result<Self> {
        let globs = if section.patterns.is_empty() {
            None
        } else {
            Some(build_globset(&section.patterns)?)
        };

        Ok(Self {
            fs,
            symlinks: section.symlinks,
            globs,
        })
    }

    /// Factory for the default behaviour: symlinks only.
    pub fn symlinks_only(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            symlinks: true,
            globs: None,
        }
    }
}

impl PredicateFactory for ConfiguredPredicateFactory {
    fn for_scope(&self, scope_root: &Path) -> Result<Box<dyn IgnorePredicate>> {
        let mut members: Vec<Box<dyn IgnorePredicate>> = Vec::new();

        if self.symlinks {
            members.push(Box::new(SymlinkPredicate::new(Arc::clone(&self.fs))));
        }
        if let Some(set) = &self.globs {
            members.push(Box::new(GlobPredicate::new(
                Arc::clone(&self.fs),
                scope_root,
                set.clone(),
            )));
        }

        // Skip the wrapper for the common single-predicate case.
        if members.len() == 1 {
            if let Some(only) = members.pop() {
                return Ok(only);
            }
        }
        Ok(Box::new(AnyPredicate::new(members)))
    }
}

/// Build a GlobSet from simple string patterns.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(pat)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
