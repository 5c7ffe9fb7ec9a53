// src/fs/mock.rs

use super::{EntryKind, FileSystem};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Symlink chains longer than this are treated as loops.
const MAX_LINK_HOPS: usize = 16;

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir(Vec<String>), // List of child names
    /// Link target, relative to the link's parent unless absolute.
    Symlink(PathBuf),
}

/// In-memory filesystem for tests.
///
/// Paths are used verbatim as keys; tests should stick to absolute paths
/// (`/repo/...`). Parent directories are created implicitly.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(PathBuf::from("/"), MockEntry::Dir(Vec::new()));

        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.insert(path.as_ref(), MockEntry::File(content.into()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut entries = self.entries.lock().unwrap();
        ensure_dir_entry(&mut entries, path.as_ref());
    }

    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl AsRef<Path>) {
        self.insert(path.as_ref(), MockEntry::Symlink(target.as_ref().to_path_buf()));
    }

    /// Remove an entry (and, for directories, everything below it).
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|p, _| !p.starts_with(path));
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            if let Some(MockEntry::Dir(children)) = entries.get_mut(parent) {
                children.retain(|c| c.as_str() != name.to_string_lossy());
            }
        }
    }

    /// Raw file contents, without following links.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let entries = self.entries.lock().unwrap();
        match entries.get(path.as_ref()) {
            Some(MockEntry::File(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    fn insert(&self, path: &Path, entry: MockEntry) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(parent) = path.parent() {
            ensure_dir_entry(&mut entries, parent);
            link_child(&mut entries, parent, path);
        }
        entries.insert(path.to_path_buf(), entry);
    }

    /// Follow symlinks until a non-link entry (or nothing) is found.
    fn resolve(&self, path: &Path) -> Option<MockEntry> {
        let entries = self.entries.lock().unwrap();
        let mut current = path.to_path_buf();
        for _ in 0..MAX_LINK_HOPS {
            match entries.get(&current) {
                Some(MockEntry::Symlink(target)) => {
                    let base = current.parent().unwrap_or(Path::new("/"));
                    current = normalize(&base.join(target));
                }
                other => return other.cloned(),
            }
        }
        None
    }
}

fn ensure_dir_entry(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    if entries.contains_key(path) {
        return;
    }
    entries.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
    if let Some(parent) = path.parent() {
        ensure_dir_entry(entries, parent);
        link_child(entries, parent, path);
    }
}

fn link_child(entries: &mut HashMap<PathBuf, MockEntry>, parent: &Path, child: &Path) {
    let Some(name) = child.file_name().and_then(|n| n.to_str()) else {
        return;
    };
    if let Some(MockEntry::Dir(children)) = entries.get_mut(parent) {
        if !children.iter().any(|c| c == name) {
            children.push(name.to_string());
        }
    }
}

/// Lexically fold `.` and `..` so link targets like `../x` land on a key.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        match self.resolve(path) {
            Some(MockEntry::File(content)) => {
                String::from_utf8(content).map_err(|e| anyhow!("Invalid UTF-8: {}", e))
            }
            Some(_) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.add_file(path, contents);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_some()
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.resolve(path), Some(MockEntry::File(_)))
    }

    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        let entries = self.entries.lock().unwrap();
        match entries.get(path) {
            Some(MockEntry::File(_)) => Ok(EntryKind::File),
            Some(MockEntry::Dir(_)) => Ok(EntryKind::Dir),
            Some(MockEntry::Symlink(_)) => Ok(EntryKind::Symlink),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such entry: {:?}", path),
            )),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        match self.resolve(path) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            _ => Err(anyhow!("Not a directory or not found: {:?}", path)),
        }
    }
}
