//! Content deck: the ordered, immutable list of items laid along the path.
//!
//! Deck files are plain text:
//!
//! ```text
//! # First title
//! Body text, which may span
//! several lines.
//!
//! # Second title
//! More body.
//! ```
//!
//! Anything before the first heading is ignored.

use std::path::Path;

use thiserror::Error;

/// One item on the path.  `index` is its position in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub index: usize,
    pub title: String,
    pub body: String,
}

impl ContentItem {
    pub fn new(index: usize, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read deck {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: card heading has no title")]
    EmptyTitle { line: usize },
}

/// Title of a `# Title` heading line.  A lone `#` is a heading with a blank
/// title; `#word` is ordinary body text.
fn heading(line: &str) -> Option<&str> {
    if line == "#" {
        return Some("");
    }
    line.strip_prefix("# ").map(str::trim)
}

fn flush_body(items: &mut [ContentItem], body_lines: &mut Vec<&str>) {
    if let Some(last) = items.last_mut() {
        last.body = body_lines.join(" ");
    }
    body_lines.clear();
}

/// Parse deck text into items, numbered in order of appearance.
pub fn parse_deck(text: &str) -> Result<Vec<ContentItem>, DeckError> {
    let mut items: Vec<ContentItem> = Vec::new();
    let mut body_lines: Vec<&str> = Vec::new();

    for (n, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if let Some(title) = heading(line) {
            if title.is_empty() {
                return Err(DeckError::EmptyTitle { line: n + 1 });
            }
            flush_body(&mut items, &mut body_lines);
            items.push(ContentItem::new(items.len(), title, String::new()));
            continue;
        }
        if line.is_empty() || items.is_empty() {
            continue;
        }
        body_lines.push(line);
    }
    flush_body(&mut items, &mut body_lines);

    Ok(items)
}

/// Read and parse a deck file.
pub fn load_deck(path: &Path) -> Result<Vec<ContentItem>, DeckError> {
    let text = std::fs::read_to_string(path).map_err(|source| DeckError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let items = parse_deck(&text)?;
    tracing::debug!(path = %path.display(), count = items.len(), "deck: loaded");
    Ok(items)
}

/// The deck shown when no file is given.
pub fn default_deck() -> Vec<ContentItem> {
    const CARDS: &[(&str, &str)] = &[
        (
            "Start here",
            "Scroll to move the camera down the path. Each card lays down once you are past it.",
        ),
        (
            "Systems",
            "Event loops, schedulers and the quiet plumbing that keeps them honest.",
        ),
        (
            "Interfaces",
            "Terminal and web front ends where motion carries meaning, not decoration.",
        ),
        (
            "Tooling",
            "Build pipelines, inventories and linters that make a codebase easy to change.",
        ),
        (
            "Writing",
            "Design notes and post-mortems: what was tried, what held, what did not.",
        ),
        (
            "Contact",
            "The end of the path. Step through the portal to get in touch.",
        ),
    ];
    CARDS
        .iter()
        .enumerate()
        .map(|(i, (title, body))| ContentItem::new(i, *title, *body))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_titles_and_joined_bodies() {
        let text = "preamble is skipped\n\n# One\nfirst line\nsecond line\n\n#  Two \nbody two\n# Three\n";
        let items = parse_deck(text).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], ContentItem::new(0, "One", "first line second line"));
        assert_eq!(items[1], ContentItem::new(1, "Two", "body two"));
        assert_eq!(items[2], ContentItem::new(2, "Three", ""));
    }

    #[test]
    fn hash_without_space_is_body_text() {
        let items = parse_deck("# One\n#rust is fun\n##\n#1 priority\n").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].body, "#rust is fun ## #1 priority");
    }

    #[test]
    fn lone_hash_is_a_blank_heading() {
        let err = parse_deck("# One\n#\n").unwrap_err();
        assert!(matches!(err, DeckError::EmptyTitle { line: 2 }));
    }

    #[test]
    fn empty_text_is_an_empty_deck() {
        assert!(parse_deck("").unwrap().is_empty());
        assert!(parse_deck("just some words\n").unwrap().is_empty());
    }

    #[test]
    fn blank_heading_is_rejected_with_line_number() {
        let err = parse_deck("# ok\nbody\n#   \n").unwrap_err();
        assert!(matches!(err, DeckError::EmptyTitle { line: 3 }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_deck(Path::new("/definitely/not/here.deck")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.deck"));
    }

    #[test]
    fn default_deck_is_indexed_in_order() {
        let deck = default_deck();
        assert!(!deck.is_empty());
        for (i, item) in deck.iter().enumerate() {
            assert_eq!(item.index, i);
        }
    }
}
