//! In-memory filesystem implementation.
//!
//! Useful for tests and for hosts that own their storage and only hand the
//! core a snapshot. Directories are tracked explicitly so that writing into a
//! folder that was never created fails the same way it does on disk.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{Error, ErrorKind, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::FileSystem;

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

/// Filesystem that keeps everything in memory.
///
/// Cloning shares the same underlying storage.
#[derive(Clone, Debug, Default)]
pub struct InMemoryFileSystem {
    state: Arc<RwLock<State>>,
}

impl InMemoryFileSystem {
    /// Create a new empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (and its parent folders) to the filesystem (builder pattern).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        let path = path.as_ref();
        {
            let mut state = self.write();
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut state.dirs, parent);
            }
            state.files.insert(path.to_path_buf(), content.to_string());
        }
        self
    }

    /// Number of files stored.
    pub fn file_count(&self) -> usize {
        self.read().files.len()
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn insert_ancestors(dirs: &mut BTreeSet<PathBuf>, dir: &Path) {
    for ancestor in dir.ancestors() {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        dirs.insert(ancestor.to_path_buf());
    }
}

fn parent_exists(state: &State, path: &Path) -> bool {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => state.dirs.contains(parent),
        _ => true,
    }
}

impl FileSystem for InMemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::NotFound, format!("File not found: {:?}", path)))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        let mut state = self.write();
        if !parent_exists(&state, path) {
            return Err(Error::new(
                ErrorKind::NotFound,
                format!("Parent folder missing: {:?}", path),
            ));
        }
        state.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn create_new(&self, path: &Path, content: &str) -> Result<()> {
        let mut state = self.write();
        if state.files.contains_key(path) || state.dirs.contains(path) {
            return Err(Error::new(
                ErrorKind::AlreadyExists,
                format!("File exists: {:?}", path),
            ));
        }
        if !parent_exists(&state, path) {
            return Err(Error::new(
                ErrorKind::NotFound,
                format!("Parent folder missing: {:?}", path),
            ));
        }
        state.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.read();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut state = self.write();
        if state.files.contains_key(path) {
            return Err(Error::new(
                ErrorKind::AlreadyExists,
                format!("A file is in the way: {:?}", path),
            ));
        }
        insert_ancestors(&mut state.dirs, path);
        Ok(())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read().dirs.contains(path)
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let state = self.read();
        let dirs = state.dirs.iter().filter(|p| p.parent() == Some(dir));
        let files = state.files.keys().filter(|p| p.parent() == Some(dir));
        Ok(dirs.chain(files).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_new_requires_parent_folder() {
        let fs = InMemoryFileSystem::new();
        let err = fs
            .create_new(Path::new("notes/today.md"), "text")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        fs.create_dir_all(Path::new("notes")).unwrap();
        fs.create_new(Path::new("notes/today.md"), "text").unwrap();
        assert_eq!(
            fs.read_to_string(Path::new("notes/today.md")).unwrap(),
            "text"
        );
    }

    #[test]
    fn test_with_file_creates_ancestors() {
        let fs = InMemoryFileSystem::new().with_file("a/b/c.md", "x");
        assert!(fs.is_dir(Path::new("a")));
        assert!(fs.is_dir(Path::new("a/b")));
        assert!(!fs.is_dir(Path::new("a/b/c.md")));
        assert_eq!(fs.file_count(), 1);
    }

    #[test]
    fn test_list_files_is_shallow() {
        let fs = InMemoryFileSystem::new()
            .with_file("root/top.md", "")
            .with_file("root/sub/deep.md", "");

        let mut listed = fs.list_files(Path::new("root")).unwrap();
        listed.sort();
        assert_eq!(
            listed,
            vec![PathBuf::from("root/sub"), PathBuf::from("root/top.md")]
        );
    }
}
