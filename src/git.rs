// src/git.rs

//! The one question asked of git: where is the top of the working tree?

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::errors::{AutoIgnoreError, Result};

/// Run `git rev-parse --show-toplevel` from `cwd`.
///
/// A non-zero exit is returned as [`AutoIgnoreError::RepoRoot`] carrying
/// git's stderr, e.g. "fatal: not a git repository".
pub fn show_toplevel(cwd: &Path) -> Result<PathBuf> {
    let output = Command::new("git")
        .arg("-C")
        .arg(cwd)
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .map_err(|err| AutoIgnoreError::RepoRoot(format!("cannot run git: {err}")))?;

    if !output.status.success() {
        return Err(AutoIgnoreError::RepoRoot(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let toplevel = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if toplevel.is_empty() {
        return Err(AutoIgnoreError::RepoRoot(
            "git rev-parse --show-toplevel returned an empty path".to_string(),
        ));
    }

    debug!(%toplevel, "resolved repository root");
    Ok(PathBuf::from(toplevel))
}
