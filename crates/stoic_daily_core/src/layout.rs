//! Where each period's note lives.
//!
//! One naming scheme is used throughout: folders nest year -> month, and the
//! month identifier is the month name plus the year.
//!
//! ```text
//! <vault>/<root>/2024/2024.md
//! <vault>/<root>/2024/March2024/March2024.md
//! <vault>/<root>/2024/March2024/20240307.md
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use crate::date::DateKey;

/// Default folder inside the vault that holds every note.
pub const DEFAULT_ROOT_FOLDER: &str = "stoic-daily";

/// Default template file name, relative to the root folder.
pub const DEFAULT_TEMPLATE_FILE: &str = "TEMPLATE.md";

/// Calendar granularity with its own note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotePeriod {
    /// One note per year
    Year,
    /// One note per month, linking to its year
    Month,
    /// One note per day, linking to its month
    Day,
}

impl NotePeriod {
    /// Identifier of this period's note for `key`.
    pub fn id(self, key: &DateKey) -> String {
        match self {
            NotePeriod::Year => key.year_id(),
            NotePeriod::Month => key.month_id(),
            NotePeriod::Day => key.day_id(),
        }
    }
}

impl fmt::Display for NotePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotePeriod::Year => write!(f, "year"),
            NotePeriod::Month => write!(f, "month"),
            NotePeriod::Day => write!(f, "day"),
        }
    }
}

/// Folder, file and identifier of one period note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteLocation {
    /// Which period this note covers
    pub period: NotePeriod,
    /// Identifier, also the file stem and the `[[link]]` target
    pub id: String,
    /// Folder that contains the note
    pub dir: PathBuf,
    /// Full path of the note file
    pub file: PathBuf,
}

/// Derives note locations under a root folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteLayout {
    root: PathBuf,
    template_file: String,
}

impl NoteLayout {
    /// Layout rooted at `root` (the vault joined with the root folder).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            template_file: DEFAULT_TEMPLATE_FILE.to_string(),
        }
    }

    /// Use a different template file name.
    pub fn with_template_file(mut self, name: impl Into<String>) -> Self {
        self.template_file = name.into();
        self
    }

    /// Root folder holding every note.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the day template.
    pub fn template_path(&self) -> PathBuf {
        // Strip leading slashes so the name stays relative to the root
        self.root.join(self.template_file.trim_start_matches('/'))
    }

    /// Folder for a period.
    pub fn dir(&self, period: NotePeriod, key: &DateKey) -> PathBuf {
        let year_dir = self.root.join(key.year_id());
        match period {
            NotePeriod::Year => year_dir,
            NotePeriod::Month | NotePeriod::Day => year_dir.join(key.month_id()),
        }
    }

    /// Everything needed to materialize one period's note.
    pub fn locate(&self, period: NotePeriod, key: &DateKey) -> NoteLocation {
        let id = period.id(key);
        let dir = self.dir(period, key);
        let file = dir.join(format!("{}.md", id));
        NoteLocation {
            period,
            id,
            dir,
            file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_seventh() -> DateKey {
        DateKey::from_ymd(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_locations_for_march_seventh() {
        let layout = NoteLayout::new("/vault/stoic-daily");
        let key = march_seventh();

        let year = layout.locate(NotePeriod::Year, &key);
        assert_eq!(year.id, "2024");
        assert_eq!(year.dir, PathBuf::from("/vault/stoic-daily/2024"));
        assert_eq!(year.file, PathBuf::from("/vault/stoic-daily/2024/2024.md"));

        let month = layout.locate(NotePeriod::Month, &key);
        assert_eq!(month.id, "March2024");
        assert_eq!(
            month.file,
            PathBuf::from("/vault/stoic-daily/2024/March2024/March2024.md")
        );

        let day = layout.locate(NotePeriod::Day, &key);
        assert_eq!(day.id, "20240307");
        assert_eq!(
            day.file,
            PathBuf::from("/vault/stoic-daily/2024/March2024/20240307.md")
        );
    }

    #[test]
    fn test_day_nests_under_month_and_month_under_year() {
        let layout = NoteLayout::new("root");
        let key = march_seventh();
        let year = layout.locate(NotePeriod::Year, &key);
        let month = layout.locate(NotePeriod::Month, &key);
        let day = layout.locate(NotePeriod::Day, &key);

        assert_eq!(day.dir, month.dir);
        assert!(month.dir.starts_with(&year.dir));
        assert_ne!(month.dir, year.dir);
    }

    #[test]
    fn test_template_path_stays_under_root() {
        let layout = NoteLayout::new("root").with_template_file("/templates/day.md");
        assert_eq!(layout.template_path(), PathBuf::from("root/templates/day.md"));
        assert_eq!(
            NoteLayout::new("root").template_path(),
            PathBuf::from("root/TEMPLATE.md")
        );
    }
}
