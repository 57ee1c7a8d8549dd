use std::path::Path;
use std::process::Command;

use stoic_daily_core::config::Config;
use stoic_daily_core::error::{Result, StoicError};
use stoic_daily_core::workspace::{Note, Workspace};

/// Launch an editor to open a file
pub fn launch_editor(path: &Path, config: &Config) -> Result<()> {
    let editor = determine_editor(config.editor.as_deref())?;
    run_editor(&editor, path)
}

fn run_editor(editor: &str, path: &Path) -> Result<()> {
    log::debug!("Launching {} {:?}", editor, path);
    let status =
        Command::new(editor)
            .arg(path)
            .status()
            .map_err(|e| StoicError::EditorLaunchFailed {
                editor: editor.to_string(),
                source: e,
            })?;

    if !status.success() {
        return Err(StoicError::EditorExited(status.code().unwrap_or(-1)));
    }

    Ok(())
}

/// Determine which editor to use
fn determine_editor(configured: Option<&str>) -> Result<String> {
    // 1. Check config file
    if let Some(editor) = configured {
        return Ok(editor.to_string());
    }

    // 2. Check $EDITOR environment variable
    if let Ok(editor) = std::env::var("EDITOR") {
        return Ok(editor);
    }

    // 3. Check $VISUAL environment variable
    if let Ok(visual) = std::env::var("VISUAL") {
        return Ok(visual);
    }

    // 4. Platform-specific defaults
    #[cfg(target_os = "windows")]
    {
        return Ok("notepad.exe".to_string());
    }

    #[cfg(not(target_os = "windows"))]
    {
        for editor in &["vim", "vi", "nano"] {
            if which(editor) {
                return Ok(editor.to_string());
            }
        }
    }

    Err(StoicError::NoEditorFound)
}

/// Check if a command exists in PATH
#[cfg(not(target_os = "windows"))]
fn which(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Opens notes in the user's editor.
pub struct EditorWorkspace {
    editor: Option<String>,
}

impl EditorWorkspace {
    pub fn new(config: &Config) -> Self {
        Self {
            editor: config.editor.clone(),
        }
    }
}

impl Workspace for EditorWorkspace {
    fn open(&self, note: &Note) -> Result<()> {
        println!("Opening: {}", note);
        let editor = determine_editor(self.editor.as_deref())?;
        run_editor(&editor, note.path())
    }
}

/// "Opens" notes by printing their path (`--no-open`).
pub struct PrintWorkspace;

impl Workspace for PrintWorkspace {
    fn open(&self, note: &Note) -> Result<()> {
        println!("{}", note);
        Ok(())
    }
}
