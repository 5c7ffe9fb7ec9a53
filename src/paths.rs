// src/paths.rs

//! Conversions between filesystem paths and managed-block entries.
//!
//! Entries are always written with forward slashes and a leading `/`, which
//! anchors them to the directory owning the ignore file, whatever the host
//! path separator is.

use std::path::{Path, PathBuf};

/// Turn `path` into an anchored entry relative to `root`, e.g. `/sub/link`.
///
/// Returns `None` when `path` is not below `root` (or is `root` itself).
pub fn entry_for(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;

    let mut entry = String::new();
    for component in rel.components() {
        entry.push('/');
        entry.push_str(&component.as_os_str().to_string_lossy());
    }

    if entry.is_empty() { None } else { Some(entry) }
}

/// Resolve a managed entry back to the path it names below `root`.
///
/// Leading and repeated slashes are ignored: `/a//b` and `a/b` both resolve
/// to `<root>/a/b`.
pub fn resolve_entry(root: &Path, entry: &str) -> PathBuf {
    entry
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(root.to_path_buf(), |acc, segment| acc.join(segment))
}
