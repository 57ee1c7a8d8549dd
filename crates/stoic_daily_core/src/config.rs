//! Configuration types for stoic-daily.
//!
//! This module provides the [`Config`] struct which stores the section toggles
//! and the paths the journal writes to. Configuration is persisted as TOML
//! (typically at `~/.config/stoic-daily/config.toml` on Unix systems).
//!
//! Every field has a default, so a config file only needs the keys the user
//! wants to change:
//!
//! ```toml
//! vault_dir = "/home/me/vault"
//!
//! [sections]
//! show_evening_note = false
//! ```
//!
//! # Async-first Design
//!
//! Use `Config::load_from()` with an `AsyncFileSystem` to load config.
//! For synchronous contexts, use the `_sync` variants.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::body::{BodyStyle, NoteBodyBuilder, SectionBodyBuilder, TemplateBodyBuilder};
use crate::error::{Result, StoicError};
use crate::fs::{AsyncFileSystem, FileSystem, SyncToAsyncFs};
use crate::layout::{DEFAULT_ROOT_FOLDER, DEFAULT_TEMPLATE_FILE, NoteLayout};
use crate::lifecycle::DEFAULT_REFRESH_INTERVAL;

/// One of the optional day-note sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    /// Random quote with attribution
    Quote,
    /// Morning notes heading and prompt
    MorningNote,
    /// Evening notes heading and prompt
    EveningNote,
    /// Random practice
    Practice,
}

impl Toggle {
    /// Every toggle, in section order.
    pub const ALL: [Toggle; 4] = [
        Toggle::Quote,
        Toggle::MorningNote,
        Toggle::EveningNote,
        Toggle::Practice,
    ];

    /// Key used in the config file.
    pub fn key(self) -> &'static str {
        match self {
            Toggle::Quote => "show_quote",
            Toggle::MorningNote => "show_morning_note",
            Toggle::EveningNote => "show_evening_note",
            Toggle::Practice => "show_practice",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Toggle::Quote => "Show Quote",
            Toggle::MorningNote => "Show Morning Note",
            Toggle::EveningNote => "Show Evening Note",
            Toggle::Practice => "Show Practice",
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            Toggle::Quote => "Display stoic quote",
            Toggle::MorningNote => "Display title for morning note",
            Toggle::EveningNote => "Display title for evening note",
            Toggle::Practice => "Display stoic practice",
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Toggle {
    type Err = StoicError;

    /// Accepts the config key (`show_quote`) or the short form (`quote`,
    /// `morning-note`).
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let short = normalized.strip_prefix("show_").unwrap_or(&normalized);
        Toggle::ALL
            .into_iter()
            .find(|t| t.key().trim_start_matches("show_") == short)
            .ok_or_else(|| StoicError::UnknownToggle(s.to_string()))
    }
}

/// A toggle together with its current value, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsToggle {
    /// Config key
    pub key: &'static str,
    /// Display name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Whether the section is included
    pub value: bool,
}

/// Which sections the section body builder emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionToggles {
    /// Include the quote section
    pub show_quote: bool,
    /// Include the morning notes section
    pub show_morning_note: bool,
    /// Include the evening notes section
    pub show_evening_note: bool,
    /// Include the practice section
    pub show_practice: bool,
}

impl Default for SectionToggles {
    fn default() -> Self {
        Self {
            show_quote: true,
            show_morning_note: true,
            show_evening_note: true,
            show_practice: true,
        }
    }
}

impl SectionToggles {
    /// Current value of `toggle`.
    pub fn get(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Quote => self.show_quote,
            Toggle::MorningNote => self.show_morning_note,
            Toggle::EveningNote => self.show_evening_note,
            Toggle::Practice => self.show_practice,
        }
    }

    /// Change one toggle.
    pub fn set(&mut self, toggle: Toggle, value: bool) {
        let slot = match toggle {
            Toggle::Quote => &mut self.show_quote,
            Toggle::MorningNote => &mut self.show_morning_note,
            Toggle::EveningNote => &mut self.show_evening_note,
            Toggle::Practice => &mut self.show_practice,
        };
        *slot = value;
    }

    /// Every toggle with its name, description and value.
    pub fn all(&self) -> Vec<SettingsToggle> {
        Toggle::ALL
            .into_iter()
            .map(|t| SettingsToggle {
                key: t.key(),
                name: t.name(),
                description: t.description(),
                value: self.get(t),
            })
            .collect()
    }
}

/// `Config` is a data structure that represents the parts of stoic-daily that the user can configure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory that holds the root folder (the vault)
    pub vault_dir: PathBuf,

    /// Folder inside the vault where every note is written
    pub root_folder: String,

    /// How day notes are built: `sections` or `template`
    pub body_style: BodyStyle,

    /// Day template file name, relative to the root folder
    pub template_file: String,

    /// Preferred editor (falls back to $EDITOR if not set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// Seconds between checks in `watch` mode
    pub refresh_interval_secs: u64,

    /// Directory with `quotes.json` / `practices.json` overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_dir: Option<PathBuf>,

    /// Section toggles
    pub sections: SectionToggles,
}

impl Config {
    /// Create a new config with the given vault directory
    pub fn new(vault_dir: PathBuf) -> Self {
        Self {
            vault_dir,
            root_folder: DEFAULT_ROOT_FOLDER.to_string(),
            body_style: BodyStyle::default(),
            template_file: DEFAULT_TEMPLATE_FILE.to_string(),
            editor: None,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL.as_secs(),
            library_dir: None,
            sections: SectionToggles::default(),
        }
    }

    /// The folder holding every note: vault joined with the root folder
    pub fn root_dir(&self) -> PathBuf {
        // A leading "/" would make this an absolute path instead of relative
        let normalized = self.root_folder.trim_start_matches('/');
        self.vault_dir.join(normalized)
    }

    /// Note layout for this config
    pub fn layout(&self) -> NoteLayout {
        NoteLayout::new(self.root_dir()).with_template_file(self.template_file.clone())
    }

    /// Interval between watch ticks, never shorter than one second
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    /// Set a toggle by name (`show_quote`, `quote`, ...)
    pub fn set_toggle(&mut self, name: &str, value: bool) -> Result<Toggle> {
        let toggle = name.parse::<Toggle>()?;
        self.sections.set(toggle, value);
        Ok(toggle)
    }

    /// The day body builder selected by `body_style`
    pub fn body_builder(&self) -> Box<dyn NoteBodyBuilder> {
        match self.body_style {
            BodyStyle::Sections => Box::new(SectionBodyBuilder::new(self.sections)),
            BodyStyle::Template => Box::new(TemplateBodyBuilder::builtin()),
        }
    }

    // ========================================================================
    // AsyncFileSystem-based methods (work on all platforms)
    // ========================================================================

    /// Load config from a specific path using an AsyncFileSystem.
    pub async fn load_from<FS: AsyncFileSystem>(fs: &FS, path: &Path) -> Result<Self> {
        let contents = fs
            .read_to_string(path)
            .await
            .map_err(|e| StoicError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to a specific path using an AsyncFileSystem.
    pub async fn save_to<FS: AsyncFileSystem>(&self, fs: &FS, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs.create_dir_all(parent)
                .await
                .map_err(|e| StoicError::CreateFolder {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs.write_file(path, &contents)
            .await
            .map_err(|e| StoicError::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(())
    }

    /// Load config from an AsyncFileSystem, falling back to defaults when the
    /// file does not exist. A file that exists but does not parse is an error.
    pub async fn load_from_or_default<FS: AsyncFileSystem>(fs: &FS, path: &Path) -> Result<Self> {
        if fs.exists(path).await {
            Self::load_from(fs, path).await
        } else {
            log::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    // ========================================================================
    // Sync wrappers
    // ========================================================================

    /// Sync wrapper for [`Config::load_from`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_sync<FS: FileSystem>(fs: FS, path: &Path) -> Result<Self> {
        futures_lite::future::block_on(Self::load_from(&SyncToAsyncFs::new(fs), path))
    }

    /// Sync wrapper for [`Config::save_to`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_sync<FS: FileSystem>(&self, fs: FS, path: &Path) -> Result<()> {
        futures_lite::future::block_on(self.save_to(&SyncToAsyncFs::new(fs), path))
    }

    /// Sync wrapper for [`Config::load_from_or_default`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_or_default_sync<FS: FileSystem>(fs: FS, path: &Path) -> Result<Self> {
        futures_lite::future::block_on(Self::load_from_or_default(&SyncToAsyncFs::new(fs), path))
    }
}

// ============================================================================
// Native-only implementation
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl Default for Config {
    fn default() -> Self {
        let vault = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notes");
        Self::new(vault)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Config {
    /// Get the config file path (~/.config/stoic-daily/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stoic-daily").join("config.toml"))
    }

    /// Load config from default location, or return default if file doesn't exist
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from_or_default_sync(crate::fs::RealFileSystem, &path),
            None => Ok(Config::default()),
        }
    }

    /// Save config to default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(StoicError::NoConfigDir)?;
        self.save_to_sync(crate::fs::RealFileSystem, &path)
    }

    /// Initialize config with user-provided values and save it to `path`,
    /// or to the default location when no path is given
    pub fn init(
        vault_dir: Option<PathBuf>,
        root_folder: Option<String>,
        path: Option<&Path>,
    ) -> Result<Self> {
        let mut config = match vault_dir {
            Some(dir) => Config::new(dir),
            None => Config::default(),
        };
        if let Some(folder) = root_folder {
            config.root_folder = folder;
        }
        match path {
            Some(path) => config.save_to_sync(crate::fs::RealFileSystem, path)?,
            None => config.save()?,
        }
        Ok(config)
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for Config {
    fn default() -> Self {
        Self::new(PathBuf::from("/notes"))
    }
}
