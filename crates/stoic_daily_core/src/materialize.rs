//! Idempotent note creation.
//!
//! [`NoteMaterializer::ensure`] is the only way notes reach storage: it
//! creates the folder and the file when they are missing and otherwise leaves
//! the existing note alone. Existing notes are never overwritten.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoicError};
use crate::fs::AsyncFileSystem;
use crate::layout::NoteLocation;
use crate::workspace::Note;

/// What [`NoteMaterializer::ensure`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialized {
    /// The note did not exist and was written
    Created,
    /// The note already existed; nothing was written
    AlreadyPresent,
}

impl Materialized {
    /// Whether a new file was written.
    pub fn created(self) -> bool {
        self == Materialized::Created
    }
}

/// Creates notes under a root folder without ever clobbering one.
#[derive(Debug, Clone)]
pub struct NoteMaterializer<FS> {
    fs: FS,
    root: PathBuf,
}

impl<FS: AsyncFileSystem> NoteMaterializer<FS> {
    /// Materializer writing through `fs`, looking notes up under `root`.
    pub fn new(fs: FS, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    /// The storage notes are written to.
    pub fn fs(&self) -> &FS {
        &self.fs
    }

    /// Root folder searched by [`Self::find_by_path`].
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a file or folder exists at `path`.
    pub async fn is_present(&self, path: &Path) -> bool {
        self.fs.exists(path).await
    }

    /// Make sure `dir` exists and `file` exists inside it.
    ///
    /// `text` is written only when `file` is missing.
    pub async fn ensure(&self, dir: &Path, file: &Path, text: &str) -> Result<Materialized> {
        if self.fs.exists(dir).await {
            log::debug!("Folder {:?} exists", dir);
        } else {
            self.fs
                .create_dir_all(dir)
                .await
                .map_err(|e| StoicError::CreateFolder {
                    path: dir.to_path_buf(),
                    source: e,
                })?;
            log::debug!("Created folder {:?}", dir);
        }

        if self.fs.exists(file).await {
            log::debug!("Note {:?} exists, leaving it untouched", file);
            return Ok(Materialized::AlreadyPresent);
        }

        match self.fs.create_new(file, text).await {
            Ok(()) => {
                log::info!("Created note {:?}", file);
                Ok(Materialized::Created)
            }
            // Someone else wrote it between the check and the create
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                log::debug!("Note {:?} appeared concurrently, leaving it untouched", file);
                Ok(Materialized::AlreadyPresent)
            }
            Err(e) => Err(StoicError::FileWrite {
                path: file.to_path_buf(),
                source: e,
            }),
        }
    }

    /// [`Self::ensure`] for a located period note.
    pub async fn ensure_period(&self, location: &NoteLocation, text: &str) -> Result<Materialized> {
        self.ensure(&location.dir, &location.file, text).await
    }

    /// Exact-path lookup among every file under the root folder.
    pub async fn find_by_path(&self, path: &Path) -> Result<Option<Note>> {
        let files = self.fs.list_all_files_recursive(&self.root).await?;
        Ok(files
            .into_iter()
            .find(|candidate| candidate == path)
            .map(Note::new))
    }
}
