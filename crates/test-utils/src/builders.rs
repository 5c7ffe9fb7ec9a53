#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use autoignore::block::{BLOCK_FOOTER, BLOCK_HEADER};
use autoignore::config::ConfigFile;
use autoignore::driver::{reconcile_tree, RunSummary};
use autoignore::fs::mock::MockFileSystem;
use autoignore::fs::FileSystem;
use autoignore::predicate::{ConfiguredPredicateFactory, PredicateFactory};
use autoignore::scope::WriteMode;
use tempfile::TempDir;

/// Build ignore file text: `preamble`, a managed block holding `managed`
/// (omitted when `None`), then `trailing`.
pub fn ignore_text(preamble: &[&str], managed: Option<&[&str]>, trailing: &[&str]) -> String {
    let mut out = String::new();
    for line in preamble {
        out.push_str(line);
        out.push('\n');
    }
    if let Some(entries) = managed {
        out.push_str(BLOCK_HEADER);
        out.push('\n');
        for entry in entries {
            out.push_str(entry);
            out.push('\n');
        }
        out.push_str(BLOCK_FOOTER);
        out.push('\n');
    }
    for line in trailing {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Result of [`run_tree`]: the summary plus everything printed.
pub struct RunOutput {
    pub summary: RunSummary,
    pub stdout: String,
}

/// Run a full pass with the default config and the given factory.
pub fn run_tree_with(
    fs: &dyn FileSystem,
    root: &Path,
    factory: &dyn PredicateFactory,
    mode: WriteMode,
) -> RunOutput {
    let mut out = Vec::new();
    let summary = reconcile_tree(fs, root, &ConfigFile::default(), factory, mode, &mut out)
        .expect("reconcile_tree failed");
    RunOutput {
        summary,
        stdout: String::from_utf8(out).expect("report is not UTF-8"),
    }
}

/// Run a full pass with the default config and the symlink predicate.
pub fn run_tree(fs: Arc<dyn FileSystem>, root: &Path, mode: WriteMode) -> RunOutput {
    let factory = ConfiguredPredicateFactory::symlinks_only(Arc::clone(&fs));
    run_tree_with(fs.as_ref(), root, &factory, mode)
}

/// In-memory repository rooted at an absolute path such as `/repo`.
///
/// `.git/` is created up front so pruning is always exercised.
#[derive(Debug, Clone)]
pub struct MockRepo {
    fs: MockFileSystem,
    root: PathBuf,
}

impl MockRepo {
    pub fn new(root: &str) -> Self {
        let fs = MockFileSystem::new();
        let root = PathBuf::from(root);
        fs.add_file(root.join(".git/HEAD"), "ref: refs/heads/main\n");
        Self { fs, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn fs(&self) -> &MockFileSystem {
        &self.fs
    }

    pub fn shared(&self) -> Arc<dyn FileSystem> {
        Arc::new(self.fs.clone())
    }

    pub fn with_file(self, rel: &str, content: &str) -> Self {
        self.fs.add_file(self.path(rel), content);
        self
    }

    pub fn with_dir(self, rel: &str) -> Self {
        self.fs.add_dir(self.path(rel));
        self
    }

    pub fn with_symlink(self, rel: &str, target: &str) -> Self {
        self.fs.add_symlink(self.path(rel), target);
        self
    }

    pub fn remove(&self, rel: &str) {
        self.fs.remove(self.path(rel));
    }

    pub fn read(&self, rel: &str) -> String {
        self.fs
            .contents(self.path(rel))
            .unwrap_or_else(|| panic!("no file at {rel}"))
    }
}

/// Real repository layout in a temporary directory.
pub struct TempRepo {
    dir: TempDir,
}

impl TempRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("creating temp dir");
        fs::create_dir_all(dir.path().join(".git")).expect("creating .git");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("creating parent dirs");
        }
        fs::write(&path, content).expect("writing file");
        path
    }

    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).expect("creating dir");
        path
    }

    #[cfg(unix)]
    pub fn symlink(&self, rel: &str, target: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("creating parent dirs");
        }
        std::os::unix::fs::symlink(target, &path).expect("creating symlink");
        path
    }

    pub fn remove(&self, rel: &str) {
        fs::remove_file(self.path(rel)).expect("removing file");
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).expect("reading file")
    }
}

impl Default for TempRepo {
    fn default() -> Self {
        Self::new()
    }
}
