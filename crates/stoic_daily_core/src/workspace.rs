//! The view notes are opened in.
//!
//! The core never decides *how* a note is shown. Hosts implement
//! [`Workspace`]: the CLI launches an editor, tests record what was opened.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;

/// A note file, identified by its full path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Note {
    path: PathBuf,
}

impl Note {
    /// Note at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Full path of the note file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File stem, which is also the note's link target.
    pub fn id(&self) -> Option<&str> {
        self.path.file_stem().and_then(|s| s.to_str())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Opens a note in the active view.
pub trait Workspace: Send + Sync {
    /// Show `note` to the user.
    fn open(&self, note: &Note) -> Result<()>;
}

impl<T: Workspace + ?Sized> Workspace for &T {
    fn open(&self, note: &Note) -> Result<()> {
        (**self).open(note)
    }
}

impl<T: Workspace + ?Sized> Workspace for Arc<T> {
    fn open(&self, note: &Note) -> Result<()> {
        (**self).open(note)
    }
}
