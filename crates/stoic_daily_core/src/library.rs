//! Quotes and practices the notes draw from.
//!
//! Both lists ship with the crate as JSON (`assets/quotes.json`,
//! `assets/practices.json`). A user directory holding files with the same
//! names replaces the bundled list it provides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoicError};
use crate::fs::AsyncFileSystem;
use crate::random::RandomSelector;

const BUNDLED_QUOTES: &str = include_str!("../assets/quotes.json");
const BUNDLED_PRACTICES: &str = include_str!("../assets/practices.json");

/// File name of a quotes override inside a library directory.
pub const QUOTES_FILE: &str = "quotes.json";
/// File name of a practices override inside a library directory.
pub const PRACTICES_FILE: &str = "practices.json";

/// A quote and who said it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The quote itself
    pub text: String,
    /// Attribution
    pub author: String,
}

/// A daily exercise prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Practice {
    /// The prompt
    pub text: String,
}

#[derive(Deserialize)]
struct QuotesFile {
    quotes: Vec<Quote>,
}

#[derive(Deserialize)]
struct PracticesFile {
    practices: Vec<Practice>,
}

/// The fixed quote and practice lists. Neither list is ever empty.
#[derive(Debug, Clone)]
pub struct Library {
    quotes: Vec<Quote>,
    practices: Vec<Practice>,
}

impl Library {
    /// Build a library, rejecting empty lists.
    pub fn new(quotes: Vec<Quote>, practices: Vec<Practice>) -> Result<Self> {
        if quotes.is_empty() {
            return Err(StoicError::EmptyLibrary("quotes"));
        }
        if practices.is_empty() {
            return Err(StoicError::EmptyLibrary("practices"));
        }
        Ok(Self { quotes, practices })
    }

    /// The lists compiled into the crate.
    pub fn bundled() -> Result<Self> {
        let quotes = parse_quotes(BUNDLED_QUOTES, Path::new(QUOTES_FILE))?;
        let practices = parse_practices(BUNDLED_PRACTICES, Path::new(PRACTICES_FILE))?;
        Self::new(quotes, practices)
    }

    /// Bundled lists, with each list replaced by `dir/quotes.json` or
    /// `dir/practices.json` when that file exists.
    pub async fn load_with_overrides<FS: AsyncFileSystem>(fs: &FS, dir: &Path) -> Result<Self> {
        let bundled = Self::bundled()?;

        let quotes_path = dir.join(QUOTES_FILE);
        let quotes = if fs.exists(&quotes_path).await {
            let raw = read(fs, &quotes_path).await?;
            log::debug!("Loading quotes from {:?}", quotes_path);
            parse_quotes(&raw, &quotes_path)?
        } else {
            bundled.quotes
        };

        let practices_path = dir.join(PRACTICES_FILE);
        let practices = if fs.exists(&practices_path).await {
            let raw = read(fs, &practices_path).await?;
            log::debug!("Loading practices from {:?}", practices_path);
            parse_practices(&raw, &practices_path)?
        } else {
            bundled.practices
        };

        Self::new(quotes, practices)
    }

    /// All quotes.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// All practices.
    pub fn practices(&self) -> &[Practice] {
        &self.practices
    }

    /// A uniformly random quote.
    pub fn random_quote(&self, selector: &RandomSelector) -> Result<&Quote> {
        selector
            .pick(&self.quotes)
            .ok_or(StoicError::EmptyLibrary("quotes"))
    }

    /// A uniformly random practice.
    pub fn random_practice(&self, selector: &RandomSelector) -> Result<&Practice> {
        selector
            .pick(&self.practices)
            .ok_or(StoicError::EmptyLibrary("practices"))
    }
}

async fn read<FS: AsyncFileSystem>(fs: &FS, path: &Path) -> Result<String> {
    fs.read_to_string(path)
        .await
        .map_err(|e| StoicError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })
}

fn parse_quotes(raw: &str, path: &Path) -> Result<Vec<Quote>> {
    serde_json::from_str::<QuotesFile>(raw)
        .map(|f| f.quotes)
        .map_err(|e| StoicError::LibraryParse {
            path: path.to_path_buf(),
            source: e,
        })
}

fn parse_practices(raw: &str, path: &Path) -> Result<Vec<Practice>> {
    serde_json::from_str::<PracticesFile>(raw)
        .map(|f| f.practices)
        .map_err(|e| StoicError::LibraryParse {
            path: path.to_path_buf(),
            source: e,
        })
}
