//! Day note body strategies.
//!
//! Two ways of building a day body coexist behind [`NoteBodyBuilder`]:
//! [`SectionBodyBuilder`] composes toggled sections in code, and
//! [`TemplateBodyBuilder`] expands the user's `TEMPLATE.md` through the token
//! registry. [`BodyStyle`] picks one; they never mix.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::compose;
use crate::config::SectionToggles;
use crate::date::DateKey;
use crate::error::{Result, StoicError};
use crate::fs::{AsyncFileSystem, BoxFuture};
use crate::layout::NoteLayout;
use crate::library::Library;
use crate::random::RandomSelector;
use crate::template::{CommandRegistry, DEFAULT_DAY_TEMPLATE, TokenContext};

/// Which builder produces day bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyStyle {
    /// Toggle-driven sections
    #[default]
    Sections,
    /// `%TOKEN%` template file
    Template,
}

impl fmt::Display for BodyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyStyle::Sections => write!(f, "sections"),
            BodyStyle::Template => write!(f, "template"),
        }
    }
}

impl FromStr for BodyStyle {
    type Err = StoicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sections" | "section" => Ok(BodyStyle::Sections),
            "template" => Ok(BodyStyle::Template),
            _ => Err(StoicError::UnknownBodyStyle(s.to_string())),
        }
    }
}

/// Everything a builder may read while producing one day body.
pub struct DayContext<'a> {
    /// Storage the notes live in
    pub fs: &'a dyn AsyncFileSystem,
    /// Where the template file is
    pub layout: &'a NoteLayout,
    /// The day being built
    pub key: DateKey,
    /// Quotes and practices
    pub library: &'a Library,
    /// Entropy for random picks
    pub selector: &'a RandomSelector,
}

/// Produces the text of a new day note.
pub trait NoteBodyBuilder: Send + Sync {
    /// Which style this builder implements.
    fn kind(&self) -> BodyStyle;

    /// Build the body for `ctx.key`.
    fn day_body<'a>(&'a self, ctx: &'a DayContext<'a>) -> BoxFuture<'a, Result<String>>;
}

/// Composes the toggled sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionBodyBuilder {
    toggles: SectionToggles,
}

impl SectionBodyBuilder {
    /// Builder emitting the sections enabled in `toggles`.
    pub fn new(toggles: SectionToggles) -> Self {
        Self { toggles }
    }
}

impl NoteBodyBuilder for SectionBodyBuilder {
    fn kind(&self) -> BodyStyle {
        BodyStyle::Sections
    }

    fn day_body<'a>(&'a self, ctx: &'a DayContext<'a>) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            compose::compose_daily_body(&self.toggles, &ctx.key, ctx.library, ctx.selector)
        })
    }
}

/// Expands the template file, re-read on every call so edits apply to the
/// next new note.
#[derive(Debug, Default)]
pub struct TemplateBodyBuilder {
    registry: CommandRegistry,
}

impl TemplateBodyBuilder {
    /// Builder over a custom registry.
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    /// Builder over the built-in tokens.
    pub fn builtin() -> Self {
        Self::new(CommandRegistry::builtin())
    }

    /// The registry tokens resolve through.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }
}

impl NoteBodyBuilder for TemplateBodyBuilder {
    fn kind(&self) -> BodyStyle {
        BodyStyle::Template
    }

    fn day_body<'a>(&'a self, ctx: &'a DayContext<'a>) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let template = load_template(ctx.fs, ctx.layout).await?;
            let tokens = TokenContext {
                key: ctx.key,
                library: ctx.library,
                selector: ctx.selector,
            };
            self.registry.render(&template, &tokens)
        })
    }
}

/// Read the user's template, or fall back to [`DEFAULT_DAY_TEMPLATE`].
pub async fn load_template<FS>(fs: &FS, layout: &NoteLayout) -> Result<String>
where
    FS: AsyncFileSystem + ?Sized,
{
    let path = layout.template_path();
    match read_template(fs, &path).await? {
        Some(text) => Ok(text),
        None => {
            log::warn!(
                "Template {:?} not found, using the built-in day template",
                path
            );
            Ok(DEFAULT_DAY_TEMPLATE.to_string())
        }
    }
}

/// The template file contents, `None` when it does not exist.
pub async fn read_template<FS>(fs: &FS, path: &Path) -> Result<Option<String>>
where
    FS: AsyncFileSystem + ?Sized,
{
    if !fs.exists(path).await {
        return Ok(None);
    }
    fs.read_to_string(path)
        .await
        .map(Some)
        .map_err(|e| StoicError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{InMemoryFileSystem, SyncToAsyncFs, block_on_test};
    use crate::library::{Practice, Quote};

    fn library() -> Library {
        Library::new(
            vec![Quote {
                text: "Q".into(),
                author: "A".into(),
            }],
            vec![Practice { text: "P".into() }],
        )
        .unwrap()
    }

    fn build(builder: &dyn NoteBodyBuilder, fs: &dyn AsyncFileSystem) -> Result<String> {
        let layout = NoteLayout::new("root");
        let library = library();
        let selector = RandomSelector::seeded(5);
        let ctx = DayContext {
            fs,
            layout: &layout,
            key: DateKey::from_ymd(2024, 3, 7).unwrap(),
            library: &library,
            selector: &selector,
        };
        block_on_test(builder.day_body(&ctx))
    }

    #[test]
    fn test_template_file_is_used_when_present() {
        let fs = SyncToAsyncFs::new(
            InMemoryFileSystem::new().with_file("root/TEMPLATE.md", "%MONTH_LINK% / %PRACTICE%"),
        );
        let body = build(&TemplateBodyBuilder::builtin(), &fs).unwrap();
        assert_eq!(body, "Month: [[March2024]] / # Today Practice\n> P");
    }

    #[test]
    fn test_missing_template_falls_back_to_default() {
        let fs = SyncToAsyncFs::new(InMemoryFileSystem::new());
        let body = build(&TemplateBodyBuilder::builtin(), &fs).unwrap();
        assert!(body.starts_with("---\ntags: daily\n---\nMonth: [[March2024]]"));
        assert!(body.contains("# Today Quote\n> Q\n\\- A"));
    }

    #[test]
    fn test_template_builder_ignores_toggles() {
        let fs = SyncToAsyncFs::new(
            InMemoryFileSystem::new().with_file("root/TEMPLATE.md", "%QUOTE%"),
        );
        let body = build(&TemplateBodyBuilder::builtin(), &fs).unwrap();
        assert_eq!(body, "# Today Quote\n> Q\n\\- A");
    }

    #[test]
    fn test_section_builder_uses_toggles() {
        let fs = SyncToAsyncFs::new(InMemoryFileSystem::new());
        let toggles = SectionToggles {
            show_quote: false,
            show_morning_note: false,
            show_evening_note: true,
            show_practice: false,
        };
        let body = build(&SectionBodyBuilder::new(toggles), &fs).unwrap();
        assert!(body.ends_with("# Evening Notes\n- This day was ..."));
    }

    #[test]
    fn test_unterminated_template_fails() {
        let fs = SyncToAsyncFs::new(
            InMemoryFileSystem::new().with_file("root/TEMPLATE.md", "%META%\n%QUOTE"),
        );
        let err = build(&TemplateBodyBuilder::builtin(), &fs).unwrap_err();
        assert!(matches!(err, StoicError::Template(_)));
    }

    #[test]
    fn test_body_style_parsing() {
        assert_eq!("Template".parse::<BodyStyle>().unwrap(), BodyStyle::Template);
        assert_eq!("sections".parse::<BodyStyle>().unwrap(), BodyStyle::Sections);
        assert!(matches!(
            "fancy".parse::<BodyStyle>(),
            Err(StoicError::UnknownBodyStyle(_))
        ));
    }
}
