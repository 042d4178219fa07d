//! Shared utility functions for board rendering.

use std::sync::LazyLock;

use pulldown_cmark::HeadingLevel;
use regex::Regex;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());

/// Convert free text into a CSS-friendly identifier.
///
/// The text is lowercased and every run of non-word characters becomes a
/// single `-`. Leading and trailing separators are kept, so callers that want
/// a clean slug should trim the input first.
///
/// # Examples
///
/// ```
/// use crepido_renderer::slugify;
///
/// assert_eq!(slugify("Project Name"), "project-name");
/// assert_eq!(slugify("Q3 / Q4 goals"), "q3-q4-goals");
/// ```
pub fn slugify(text: &str) -> String {
    NON_WORD
        .replace_all(&text.to_lowercase(), "-")
        .into_owned()
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_lowercases_and_joins() {
        assert_eq!(slugify("Project Name"), "project-name");
    }

    #[test]
    fn test_slugify_collapses_separator_runs() {
        assert_eq!(slugify("a  --  b"), "a-b");
        assert_eq!(slugify("v1.2.3"), "v1-2-3");
    }

    #[test]
    fn test_slugify_keeps_underscores() {
        assert_eq!(slugify("snake_case"), "snake_case");
    }

    #[test]
    fn test_slugify_keeps_edge_separators() {
        assert_eq!(slugify(" urgent!"), "-urgent-");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_leaves_brackets() {
        assert_eq!(escape_html("[x] [2h]"), "[x] [2h]");
    }

    #[test]
    fn test_heading_level_to_num() {
        assert_eq!(heading_level_to_num(HeadingLevel::H1), 1);
        assert_eq!(heading_level_to_num(HeadingLevel::H6), 6);
    }
}
