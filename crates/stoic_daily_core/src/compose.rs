//! Note text built straight from code: the toggle-driven day body and the
//! fixed month and year bodies.
//!
//! The line fragments here are shared with the template tokens so both day
//! body strategies produce the same family of output.

use crate::config::SectionToggles;
use crate::date::DateKey;
use crate::error::Result;
use crate::library::{Library, Practice, Quote};
use crate::random::RandomSelector;

/// Line that delimits front-matter and sections.
pub const DELIMITER: &str = "---";

/// Heading the `QUOTE` token puts above the quote.
pub const QUOTE_HEADING: &str = "# Today Quote";

/// Heading of the practice section.
pub const PRACTICE_HEADING: &str = "# Today Practice";

const FRONT_MATTER: [&str; 3] = [DELIMITER, "tags: daily", DELIMITER];

/// The fixed front-matter block.
pub fn front_matter() -> String {
    FRONT_MATTER.join("\n")
}

/// Back-link from a day note to its month note.
pub fn month_link(key: &DateKey) -> String {
    format!("Month: [[{}]]", key.month_id())
}

/// Back-link from a month note to its year note.
pub fn year_link(key: &DateKey) -> String {
    format!("Year: [[{}]]", key.year_id())
}

/// Quote and attribution. The dash is escaped so it is not read as a list.
pub fn quote_lines(quote: &Quote) -> Vec<String> {
    vec![format!("> {}", quote.text), format!("\\- {}", quote.author)]
}

/// Heading and practice prompt.
pub fn practice_lines(practice: &Practice) -> Vec<String> {
    vec![PRACTICE_HEADING.to_string(), format!("> {}", practice.text)]
}

fn morning_lines() -> Vec<String> {
    vec!["# Morning Notes".to_string(), "- Today I will ...".to_string()]
}

fn evening_lines() -> Vec<String> {
    vec!["# Evening Notes".to_string(), "- This day was ...".to_string()]
}

struct Section {
    lines: Vec<String>,
    // A paragraph directly above `---` would turn into a heading
    blank_before_delimiter: bool,
}

/// Build a day body from the section toggles.
///
/// Enabled sections appear in the order quote, morning notes, evening notes,
/// practice, with a `---` line between consecutive sections only.
pub fn compose_daily_body(
    toggles: &SectionToggles,
    key: &DateKey,
    library: &Library,
    selector: &RandomSelector,
) -> Result<String> {
    let mut sections = Vec::with_capacity(4);

    if toggles.show_quote {
        sections.push(Section {
            lines: quote_lines(library.random_quote(selector)?),
            blank_before_delimiter: true,
        });
    }
    if toggles.show_morning_note {
        sections.push(Section {
            lines: morning_lines(),
            blank_before_delimiter: false,
        });
    }
    if toggles.show_evening_note {
        sections.push(Section {
            lines: evening_lines(),
            blank_before_delimiter: false,
        });
    }
    if toggles.show_practice {
        sections.push(Section {
            lines: practice_lines(library.random_practice(selector)?),
            blank_before_delimiter: false,
        });
    }

    let mut lines: Vec<String> = FRONT_MATTER.iter().map(|l| l.to_string()).collect();
    lines.push(month_link(key));
    lines.push(String::new());

    let last = sections.len().saturating_sub(1);
    for (i, section) in sections.into_iter().enumerate() {
        lines.extend(section.lines);
        if i < last {
            if section.blank_before_delimiter {
                lines.push(String::new());
            }
            lines.push(DELIMITER.to_string());
        }
    }

    Ok(lines.join("\n"))
}

/// Body of a month note.
pub fn month_note_text(key: &DateKey) -> String {
    [
        front_matter(),
        year_link(key),
        String::new(),
        "# The result of a stoic month".to_string(),
    ]
    .join("\n")
}

/// Body of a year note.
pub fn year_note_text() -> String {
    [
        front_matter(),
        String::new(),
        "# The result of a stoic year".to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Library {
        Library::new(
            vec![Quote {
                text: "Waste no more time.".into(),
                author: "Marcus Aurelius".into(),
            }],
            vec![Practice {
                text: "Pause before reacting.".into(),
            }],
        )
        .unwrap()
    }

    fn key() -> DateKey {
        DateKey::from_ymd(2024, 3, 7).unwrap()
    }

    fn toggles(quote: bool, morning: bool, evening: bool, practice: bool) -> SectionToggles {
        SectionToggles {
            show_quote: quote,
            show_morning_note: morning,
            show_evening_note: evening,
            show_practice: practice,
        }
    }

    #[test]
    fn test_all_sections_enabled() {
        let body = compose_daily_body(
            &SectionToggles::default(),
            &key(),
            &library(),
            &RandomSelector::seeded(0),
        )
        .unwrap();

        assert_eq!(
            body,
            "---\ntags: daily\n---\n\
             Month: [[March2024]]\n\
             \n\
             > Waste no more time.\n\\- Marcus Aurelius\n\
             \n\
             ---\n\
             # Morning Notes\n- Today I will ...\n\
             ---\n\
             # Evening Notes\n- This day was ...\n\
             ---\n\
             # Today Practice\n> Pause before reacting."
        );
    }

    #[test]
    fn test_only_practice_has_no_stray_delimiters() {
        let body = compose_daily_body(
            &toggles(false, false, false, true),
            &key(),
            &library(),
            &RandomSelector::seeded(0),
        )
        .unwrap();

        assert_eq!(
            body,
            "---\ntags: daily\n---\nMonth: [[March2024]]\n\n# Today Practice\n> Pause before reacting."
        );
        // Only the two front-matter fences
        assert_eq!(body.lines().filter(|l| *l == DELIMITER).count(), 2);
    }

    #[test]
    fn test_only_quote_ends_without_delimiter() {
        let body = compose_daily_body(
            &toggles(true, false, false, false),
            &key(),
            &library(),
            &RandomSelector::seeded(0),
        )
        .unwrap();

        assert!(body.ends_with("\\- Marcus Aurelius"));
        assert_eq!(body.lines().filter(|l| *l == DELIMITER).count(), 2);
    }

    #[test]
    fn test_gap_in_the_middle_keeps_one_delimiter() {
        let body = compose_daily_body(
            &toggles(false, true, false, true),
            &key(),
            &library(),
            &RandomSelector::seeded(0),
        )
        .unwrap();

        assert!(body.contains("- Today I will ...\n---\n# Today Practice"));
        assert!(!body.contains("Evening"));
        assert_eq!(body.lines().filter(|l| *l == DELIMITER).count(), 3);
    }

    #[test]
    fn test_nothing_enabled_is_just_the_prefix() {
        let body = compose_daily_body(
            &toggles(false, false, false, false),
            &key(),
            &library(),
            &RandomSelector::seeded(0),
        )
        .unwrap();
        assert_eq!(body, "---\ntags: daily\n---\nMonth: [[March2024]]\n");
    }

    #[test]
    fn test_month_and_year_bodies() {
        assert_eq!(
            month_note_text(&key()),
            "---\ntags: daily\n---\nYear: [[2024]]\n\n# The result of a stoic month"
        );
        assert_eq!(
            year_note_text(),
            "---\ntags: daily\n---\n\n# The result of a stoic year"
        );
    }
}
