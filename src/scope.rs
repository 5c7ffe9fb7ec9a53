// src/scope.rs

//! One ignore file and the files it is responsible for.
//!
//! A [`Scope`] is loaded when the walker finds an ignore file, collects the
//! files of its subtree while the walk goes on, and is then reconciled once
//! and finalized once:
//!
//! - [`Scope::reconcile`] recomputes the managed entries from the predicate
//!   and returns what was added and removed.
//! - [`Scope::finalize`] consumes the scope and writes the file back.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::block::IgnoreFileContent;
use crate::errors::{AutoIgnoreError, Result};
use crate::fs::FileSystem;
use crate::paths::{entry_for, resolve_entry};
use crate::predicate::IgnorePredicate;

/// Whether finalize may touch the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Write,
    /// `--check`: report only.
    DryRun,
}

/// What [`Scope::finalize`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finalized {
    /// The file was rewritten.
    Written,
    /// Rendered text equals what was loaded; nothing to write.
    Unchanged,
    /// Dry run; the file would have been rewritten.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct Scope {
    root: PathBuf,
    ignore_path: PathBuf,
    content: IgnoreFileContent,
    /// Text as loaded, to avoid rewriting identical content.
    loaded_text: String,
    governed: Vec<PathBuf>,
}

impl Scope {
    /// Load the scope owned by directory `root`, reading `root/<ignore_file>`.
    pub fn load(fs: &dyn FileSystem, root: &Path, ignore_file: &str) -> Result<Self> {
        let ignore_path = root.join(ignore_file);
        let text = fs.read_to_string(&ignore_path)?;
        Self::from_text(root, ignore_path, text)
    }

    /// Build a scope from already-read ignore file text.
    pub fn from_text(root: &Path, ignore_path: PathBuf, text: String) -> Result<Self> {
        let content = IgnoreFileContent::parse(&ignore_path, &text)?;
        debug!(
            path = ?ignore_path,
            managed = content.managed.len(),
            "loaded ignore file"
        );

        Ok(Self {
            root: root.to_path_buf(),
            ignore_path,
            content,
            loaded_text: text,
            governed: Vec::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ignore_path(&self) -> &Path {
        &self.ignore_path
    }

    pub fn managed(&self) -> &[String] {
        &self.content.managed
    }

    /// Files attributed to this scope, in discovery order.
    pub fn governed(&self) -> &[PathBuf] {
        &self.governed
    }

    /// Attribute a file to this scope.
    pub fn govern(&mut self, path: PathBuf) {
        self.governed.push(path);
    }

    /// Recompute the managed entries.
    ///
    /// Prior entries that still satisfy the predicate are kept with their
    /// original text, then governed files that satisfy it are appended.
    /// Duplicates collapse to their first occurrence.
    pub fn reconcile(&mut self, predicate: &dyn IgnorePredicate) -> ScopeReport {
        let prior = std::mem::take(&mut self.content.managed);
        let mut next = EntrySet::default();

        for line in &prior {
            if next.contains(line) {
                continue;
            }
            if predicate.ignore(&resolve_entry(&self.root, line)) {
                next.push(line.clone());
            }
        }

        for file in &self.governed {
            let Some(entry) = entry_for(&self.root, file) else {
                continue;
            };
            if next.contains(&entry) {
                continue;
            }
            if predicate.ignore(file) {
                next.push(entry);
            }
        }

        let prior_set: HashSet<&str> = prior.iter().map(String::as_str).collect();
        let insertions: Vec<String> = next
            .iter()
            .filter(|e| !prior_set.contains(e.as_str()))
            .cloned()
            .collect();

        let mut deletions = Vec::new();
        let mut reported = HashSet::new();
        for entry in &prior {
            if !next.contains(entry) && reported.insert(entry.as_str()) {
                deletions.push(entry.clone());
            }
        }

        self.content.managed = next.into_vec();

        let report = ScopeReport {
            ignore_path: self.ignore_path.clone(),
            insertions,
            deletions,
        };
        if report.changed() {
            info!(
                path = ?self.ignore_path,
                added = report.insertions.len(),
                removed = report.deletions.len(),
                "managed block changed"
            );
        }
        report
    }

    /// File text as it would be written now.
    pub fn render(&self) -> String {
        self.content.render()
    }

    /// Write the ignore file back. Consumes the scope: a scope is finalized
    /// exactly once.
    pub fn finalize(self, fs: &dyn FileSystem, mode: WriteMode) -> Result<Finalized> {
        let text = self.render();

        if text == self.loaded_text {
            debug!(path = ?self.ignore_path, "ignore file unchanged");
            return Ok(Finalized::Unchanged);
        }

        match mode {
            WriteMode::DryRun => {
                debug!(path = ?self.ignore_path, "dry run; not writing");
                Ok(Finalized::Skipped)
            }
            WriteMode::Write => {
                fs.write(&self.ignore_path, text.as_bytes())?;
                debug!(path = ?self.ignore_path, bytes = text.len(), "rewrote ignore file");
                Ok(Finalized::Written)
            }
        }
    }
}

/// Insertion-ordered set of entries.
#[derive(Debug, Default)]
struct EntrySet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl EntrySet {
    fn contains(&self, entry: &str) -> bool {
        self.seen.contains(entry)
    }

    fn push(&mut self, entry: String) {
        if self.seen.insert(entry.clone()) {
            self.order.push(entry);
        }
    }

    fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    fn into_vec(self) -> Vec<String> {
        self.order
    }
}

/// A scope that could not be loaded, reconciled or written.
#[derive(Debug)]
pub struct ScopeFailure {
    pub ignore_path: PathBuf,
    pub error: AutoIgnoreError,
}

/// Outcome of reconciling one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeReport {
    pub ignore_path: PathBuf,
    /// New entries, in managed-block order.
    pub insertions: Vec<String>,
    /// Dropped entries, in their previous order.
    pub deletions: Vec<String>,
}

impl ScopeReport {
    pub fn changed(&self) -> bool {
        !self.insertions.is_empty() || !self.deletions.is_empty()
    }
}

impl fmt::Display for ScopeReport {
    /// ```text
    /// /repo/.gitignore:
    ///     Additions:
    ///         /link
    ///     Deletions:
    /// ```
    /// (tab-indented), or a single `No changes` line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.ignore_path.display())?;

        if !self.changed() {
            return write!(f, "\n\tNo changes");
        }

        write!(f, "\n\tAdditions:")?;
        for entry in &self.insertions {
            write!(f, "\n\t\t{entry}")?;
        }
        write!(f, "\n\tDeletions:")?;
        for entry in &self.deletions {
            write!(f, "\n\t\t{entry}")?;
        }
        Ok(())
    }
}
