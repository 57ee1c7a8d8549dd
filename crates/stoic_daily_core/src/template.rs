//! Template engine for day notes.
//!
//! Templates use flat `%TOKEN%` placeholders. [`expand`] scans the template
//! and hands every token name to a resolver; [`CommandRegistry`] maps token
//! names to resolver functions, so new tokens are added by registration.
//!
//! Unknown tokens expand to nothing (with a warning in the log). A `%` that is
//! never closed is a [`TemplateError::Unterminated`] error.

use indexmap::IndexMap;
use thiserror::Error;

use crate::compose;
use crate::date::DateKey;
use crate::error::Result;
use crate::library::Library;
use crate::random::RandomSelector;

/// Built-in template for day notes, used when no template file exists
pub const DEFAULT_DAY_TEMPLATE: &str = "%META%
%MONTH_LINK%

%QUOTE%

---
%PRACTICE%
";

/// Template parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A `%` opened a token that no later `%` closes.
    #[error("Unterminated template token '%{token}' starting at byte {offset}")]
    Unterminated {
        /// Byte offset of the opening `%`
        offset: usize,
        /// Everything captured after the opening `%`
        token: String,
    },
}

/// Expand every `%TOKEN%` in `template` through `resolve`.
///
/// `resolve` returns `Ok(None)` for a token it does not know; that span is
/// replaced by the empty string. Resolver errors abort the expansion.
pub fn expand<F>(template: &str, mut resolve: F) -> Result<String>
where
    F: FnMut(&str) -> Result<Option<String>>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut consumed = 0;

    while let Some(open) = rest.find('%') {
        out.push_str(&rest[..open]);

        let after = &rest[open + 1..];
        let Some(close) = after.find('%') else {
            return Err(TemplateError::Unterminated {
                offset: consumed + open,
                token: after.to_string(),
            }
            .into());
        };

        let token = &after[..close];
        match resolve(token)? {
            Some(text) => out.push_str(&text),
            None => log::warn!("Unknown template token '%{}%', substituting nothing", token),
        }

        let advance = open + close + 2;
        consumed += advance;
        rest = &rest[advance..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Token names in order of appearance, without resolving anything.
pub fn scan_tokens(template: &str) -> std::result::Result<Vec<&str>, TemplateError> {
    let mut tokens = Vec::new();
    let mut rest = template;
    let mut consumed = 0;

    while let Some(open) = rest.find('%') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('%') else {
            return Err(TemplateError::Unterminated {
                offset: consumed + open,
                token: after.to_string(),
            });
        };
        tokens.push(&after[..close]);
        let advance = open + close + 2;
        consumed += advance;
        rest = &rest[advance..];
    }

    Ok(tokens)
}

/// What a resolver may draw on.
#[derive(Clone, Copy)]
pub struct TokenContext<'a> {
    /// The day being rendered
    pub key: DateKey,
    /// Quotes and practices
    pub library: &'a Library,
    /// Entropy for random picks
    pub selector: &'a RandomSelector,
}

/// A function producing the text for one token.
pub type Resolver = Box<dyn Fn(&TokenContext<'_>) -> Result<String> + Send + Sync>;

struct Command {
    description: String,
    resolver: Resolver,
}

/// Token name -> resolver mapping.
#[derive(Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, Command>,
}

impl CommandRegistry {
    /// Empty registry: every token is unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `META`, `MONTH_LINK`, `QUOTE` and `PRACTICE`.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register("META", "Front-matter block (tags: daily)", |_| {
            Ok(compose::front_matter())
        });
        registry.register(
            "MONTH_LINK",
            "Back-link to the month note, e.g. Month: [[March2024]]",
            |ctx| Ok(compose::month_link(&ctx.key)),
        );
        registry.register("QUOTE", "Heading, a random quote and its author", |ctx| {
            let quote = ctx.library.random_quote(ctx.selector)?;
            let mut lines = vec![compose::QUOTE_HEADING.to_string()];
            lines.extend(compose::quote_lines(quote));
            Ok(lines.join("\n"))
        });
        registry.register("PRACTICE", "Heading and a random practice", |ctx| {
            let practice = ctx.library.random_practice(ctx.selector)?;
            Ok(compose::practice_lines(practice).join("\n"))
        });

        registry
    }

    /// Add a token, replacing any previous resolver with the same name.
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        resolver: F,
    ) -> &mut Self
    where
        F: Fn(&TokenContext<'_>) -> Result<String> + Send + Sync + 'static,
    {
        self.commands.insert(
            name.into(),
            Command {
                description: description.into(),
                resolver: Box::new(resolver),
            },
        );
        self
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered tokens with descriptions, in registration order.
    pub fn tokens(&self) -> impl Iterator<Item = (&str, &str)> {
        self.commands
            .iter()
            .map(|(name, cmd)| (name.as_str(), cmd.description.as_str()))
    }

    /// Resolve one token; `Ok(None)` when it is not registered.
    pub fn resolve(&self, token: &str, ctx: &TokenContext<'_>) -> Result<Option<String>> {
        match self.commands.get(token) {
            Some(cmd) => (cmd.resolver)(ctx).map(Some),
            None => Ok(None),
        }
    }

    /// Expand `template` against this registry.
    pub fn render(&self, template: &str, ctx: &TokenContext<'_>) -> Result<String> {
        expand(template, |token| self.resolve(token, ctx))
    }

    /// Tokens in `template` that this registry does not know, deduplicated.
    pub fn unknown_tokens(&self, template: &str) -> Result<Vec<String>> {
        let mut unknown: Vec<String> = Vec::new();
        for token in scan_tokens(template)? {
            if !self.contains(token) && !unknown.iter().any(|t| t == token) {
                unknown.push(token.to_string());
            }
        }
        Ok(unknown)
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("tokens", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}
