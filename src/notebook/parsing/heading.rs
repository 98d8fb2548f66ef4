//! Heading detection for markdown cells
//!
//! Only ATX headings are recognized: one to six `#` at the very start of the
//! cell's trimmed text, at least one whitespace character, then the title on
//! the same line.

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::models::HeadingMarker;

static HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)").unwrap());

/// Detect a heading marker in a markdown cell's rendered text
pub(crate) fn detect_heading_marker(text: &str) -> Option<HeadingMarker> {
    let captures = HEADING_PATTERN.captures(text.trim())?;
    let level = captures.get(1)?.as_str().len() as u8;
    let title = captures.get(2)?.as_str().trim();
    if title.is_empty() {
        return None;
    }

    Some(HeadingMarker {
        level,
        title: title.to_string(),
    })
}
