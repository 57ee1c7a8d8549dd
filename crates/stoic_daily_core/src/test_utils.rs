//! Test utilities for stoic_daily_core
//!
//! Shared doubles used across the unit test modules: a filesystem that fails
//! on demand, a workspace that records what was opened, and a tiny library.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::fs::{FileSystem, InMemoryFileSystem};
use crate::library::{Library, Practice, Quote};
use crate::workspace::{Note, Workspace};

/// In-memory filesystem whose folder creation or file writes fail.
#[derive(Clone, Debug)]
pub struct FailingFileSystem {
    inner: InMemoryFileSystem,
    fail_dirs: bool,
    fail_writes: bool,
}

impl FailingFileSystem {
    /// Every `create_dir_all` fails with `PermissionDenied`.
    pub fn failing_dirs() -> Self {
        Self {
            inner: InMemoryFileSystem::new(),
            fail_dirs: true,
            fail_writes: false,
        }
    }

    /// Every `create_new` / `write_file` fails with `PermissionDenied`.
    pub fn failing_writes() -> Self {
        Self {
            inner: InMemoryFileSystem::new(),
            fail_dirs: false,
            fail_writes: true,
        }
    }

    /// The storage underneath, for assertions.
    pub fn inner(&self) -> &InMemoryFileSystem {
        &self.inner
    }
}

fn denied() -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, "denied")
}

impl FileSystem for FailingFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.inner.read_to_string(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(denied());
        }
        self.inner.write_file(path, content)
    }

    fn create_new(&self, path: &Path, content: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(denied());
        }
        self.inner.create_new(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if self.fail_dirs {
            return Err(denied());
        }
        self.inner.create_dir_all(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.inner.list_files(dir)
    }
}

/// Workspace that remembers every note it was asked to open.
#[derive(Clone, Debug, Default)]
pub struct RecordingWorkspace {
    opened: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingWorkspace {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths opened so far, oldest first.
    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().unwrap().clone()
    }
}

impl Workspace for RecordingWorkspace {
    fn open(&self, note: &Note) -> Result<()> {
        self.opened.lock().unwrap().push(note.path().to_path_buf());
        Ok(())
    }
}

/// One quote, one practice.
pub fn small_library() -> Library {
    Library::new(
        vec![Quote {
            text: "You have power over your mind.".into(),
            author: "Marcus Aurelius".into(),
        }],
        vec![Practice {
            text: "Journal before bed.".into(),
        }],
    )
    .unwrap()
}
