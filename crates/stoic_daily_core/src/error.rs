use std::path::PathBuf;

use thiserror::Error;

use crate::template::TemplateError;

/// Unified error type for stoic-daily operations
#[derive(Debug, Error)]
pub enum StoicError {
    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create folder '{path}': {source}")]
    CreateFolder {
        path: PathBuf,
        source: std::io::Error,
    },

    // Note errors
    #[error("Note not found after creation: '{0}'")]
    NoteNotFound(PathBuf),

    #[error(transparent)]
    Template(#[from] TemplateError),

    // Library errors
    #[error("No {0} available to pick from")]
    EmptyLibrary(&'static str),

    #[error("Failed to parse library file '{path}': {source}")]
    LibraryParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Date errors
    #[error("Invalid date format: '{0}'. Try 'today', 'yesterday', 'last friday', '3 days ago', or 'YYYY-MM-DD'")]
    InvalidDateFormat(String),

    // Config errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Unknown toggle '{0}'. Expected one of: show_quote, show_morning_note, show_evening_note, show_practice")]
    UnknownToggle(String),

    #[error("Unknown body style '{0}'. Expected 'sections' or 'template'")]
    UnknownBodyStyle(String),

    // Editor errors
    #[error("No editor found. Set $EDITOR, $VISUAL, or configure editor in config file")]
    NoEditorFound,

    #[error("Failed to launch editor '{editor}': {source}")]
    EditorLaunchFailed {
        editor: String,
        source: std::io::Error,
    },

    #[error("Editor exited with code {0}")]
    EditorExited(i32),
}

/// Result type alias for stoic-daily operations
pub type Result<T> = std::result::Result<T, StoicError>;
