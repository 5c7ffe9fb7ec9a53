// src/walker.rs

//! Depth-first walk that partitions a repository into scopes.
//!
//! Every directory holding an ignore file opens a new [`Scope`] for its
//! subtree, shadowing the scope of any ancestor. Files are attributed to the
//! innermost open scope; files above the first ignore file are dropped.

use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::errors::Result;
use crate::fs::{EntryKind, FileSystem};
use crate::scope::{Scope, ScopeFailure};

#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Name of the per-directory ignore file.
    pub ignore_file: String,
    /// Absolute path of the directory to prune, e.g. `<root>/.git`.
    pub metadata_dir: PathBuf,
}

impl WalkOptions {
    pub fn new(root: &Path, ignore_file: &str, metadata_dir: &str) -> Self {
        Self {
            ignore_file: ignore_file.to_string(),
            metadata_dir: root.join(metadata_dir),
        }
    }
}

#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Loaded scopes, in pre-order (a scope precedes its nested scopes).
    pub scopes: Vec<Scope>,
    /// Ignore files that could not be loaded. Their subtrees are still
    /// claimed, so none of their files leak into an ancestor scope.
    pub failures: Vec<ScopeFailure>,
}

/// Walk the tree under `root` and build its scopes.
///
/// Only failing to list `root` itself is an error; unreadable subdirectories
/// and entries are logged and skipped.
pub fn walk(fs: &dyn FileSystem, root: &Path, opts: &WalkOptions) -> Result<WalkOutcome> {
    let mut walker = Walker {
        fs,
        opts,
        slots: Vec::new(),
    };
    walker.visit(root, Owner::Unowned, true)?;

    let mut outcome = WalkOutcome::default();
    for slot in walker.slots {
        match slot {
            Slot::Loaded(scope) => outcome.scopes.push(scope),
            Slot::Failed(failure) => outcome.failures.push(failure),
        }
    }
    debug!(
        scopes = outcome.scopes.len(),
        failures = outcome.failures.len(),
        "walk complete"
    );
    Ok(outcome)
}

#[derive(Debug)]
enum Slot {
    Loaded(Scope),
    Failed(ScopeFailure),
}

/// Scope responsible for the directory being visited.
#[derive(Debug, Clone, Copy)]
enum Owner {
    Unowned,
    Slot(usize),
}

struct Walker<'a> {
    fs: &'a dyn FileSystem,
    opts: &'a WalkOptions,
    slots: Vec<Slot>,
}

impl Walker<'_> {
    fn visit(&mut self, dir: &Path, owner: Owner, is_root: bool) -> Result<()> {
        if dir == self.opts.metadata_dir {
            trace!(?dir, "pruning metadata directory");
            return Ok(());
        }

        let mut entries = match self.fs.read_dir(dir) {
            Ok(entries) => entries,
            Err(err) if is_root => return Err(err.into()),
            Err(err) => {
                warn!(?dir, error = %err, "cannot list directory; skipping subtree");
                return Ok(());
            }
        };
        // Byte-wise name order keeps reports stable across filesystems.
        entries.sort();

        let ignore_path = dir.join(&self.opts.ignore_file);
        let owns_ignore_file = entries.contains(&ignore_path) && self.fs.is_file(&ignore_path);
        let owner = if owns_ignore_file {
            self.open_scope(dir, &ignore_path)
        } else {
            owner
        };

        for path in entries {
            if owns_ignore_file && path == ignore_path {
                continue;
            }
            match self.fs.entry_kind(&path) {
                Ok(EntryKind::Dir) => self.visit(&path, owner, false)?,
                Ok(EntryKind::File | EntryKind::Symlink) => self.attribute(owner, path),
                Ok(EntryKind::Other) => trace!(?path, "skipping special file"),
                Err(err) => warn!(?path, error = %err, "cannot inspect entry; skipping"),
            }
        }

        Ok(())
    }

    fn open_scope(&mut self, dir: &Path, ignore_path: &Path) -> Owner {
        let slot = match Scope::load(self.fs, dir, &self.opts.ignore_file) {
            Ok(scope) => {
                debug!(?dir, "opened scope");
                Slot::Loaded(scope)
            }
            Err(error) => {
                warn!(path = ?ignore_path, %error, "cannot load ignore file; its subtree is skipped");
                Slot::Failed(ScopeFailure {
                    ignore_path: ignore_path.to_path_buf(),
                    error,
                })
            }
        };
        self.slots.push(slot);
        Owner::Slot(self.slots.len() - 1)
    }

    fn attribute(&mut self, owner: Owner, path: PathBuf) {
        match owner {
            Owner::Slot(idx) => match &mut self.slots[idx] {
                Slot::Loaded(scope) => scope.govern(path),
                Slot::Failed(_) => trace!(?path, "owner scope failed to load; dropping"),
            },
            Owner::Unowned => trace!(?path, "no enclosing ignore file; dropping"),
        }
    }
}
