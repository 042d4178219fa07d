//! Front matter extraction.
//!
//! A board starts with a short front matter block:
//!
//! ```text
//! ---
//! "name": "Board", "picture": "https://example.com/logo.png",
//! "owner": "platform"
//! ---
//! # First card
//! ```
//!
//! The interior lines (two, or a single one) are joined, wrapped in braces
//! and parsed as a JSON object. This is not YAML: no nesting across lines,
//! strict JSON.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::RenderError;

static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^---\r?\n([^\r\n]+)\r?\n(?:([^\r\n]+)\r?\n)?---\r?$").unwrap()
});

/// Board metadata parsed from the front matter block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Board title, used for the page title and header.
    pub name: String,

    /// Header image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,

    /// Any other keys present in the front matter.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Split a raw board document into its metadata and markdown body.
///
/// The first front matter block found is parsed and removed from the body;
/// the rest of the text is returned unchanged.
///
/// # Errors
///
/// Returns [`RenderError::MalformedDocument`] when no front matter block is
/// present and [`RenderError::MalformedMetadata`] when its content is not a
/// valid JSON object with a string `name`.
pub fn extract_front_matter(text: &str) -> Result<(Metadata, String), RenderError> {
    let caps = FRONT_MATTER
        .captures(text)
        .ok_or(RenderError::MalformedDocument)?;

    let block = caps.get(0).ok_or(RenderError::MalformedDocument)?;
    let second = caps.get(2).map_or("", |m| m.as_str());
    let json = format!("{{{}\n{second}}}", &caps[1]);
    let metadata: Metadata =
        serde_json::from_str(&json).map_err(|e| RenderError::MalformedMetadata(e.to_string()))?;

    let mut body = String::with_capacity(text.len() - block.len());
    body.push_str(&text[..block.start()]);
    body.push_str(&text[block.end()..]);

    Ok((metadata, body))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_extract_front_matter() {
        let doc = "---\n\"name\": \"Board\", \"picture\": \"p.png\",\n\"owner\": \"ops\"\n---\n# Todo\n";
        let (meta, body) = extract_front_matter(doc).unwrap();

        assert_eq!(meta.name, "Board");
        assert_eq!(meta.picture.as_deref(), Some("p.png"));
        assert_eq!(meta.extra["owner"], "ops");
        assert_eq!(body, "\n# Todo\n");
    }

    #[test]
    fn test_extract_front_matter_second_line_only_name() {
        let doc = "---\n\"picture\": \"p.png\",\n\"name\": \"Board\"\n---\nbody";
        let (meta, body) = extract_front_matter(doc).unwrap();

        assert_eq!(meta.name, "Board");
        assert_eq!(body, "\nbody");
    }

    #[test]
    fn test_extract_front_matter_crlf_takes_closing_carriage_return() {
        let doc = "---\r\n\"name\": \"Board\",\r\n\"picture\": \"p.png\"\r\n---\r\n# Todo";
        let (meta, body) = extract_front_matter(doc).unwrap();

        assert_eq!(meta.name, "Board");
        assert_eq!(body, "\n# Todo");
    }

    #[test]
    fn test_picture_is_optional() {
        let doc = "---\n\"name\": \"Board\",\n\"owner\": \"ops\"\n---\n";
        let (meta, _) = extract_front_matter(doc).unwrap();

        assert!(meta.picture.is_none());
    }

    #[test]
    fn test_missing_front_matter() {
        let result = extract_front_matter("# Just a heading\n- item");
        assert!(matches!(result, Err(RenderError::MalformedDocument)));
    }

    #[test]
    fn test_single_line_front_matter() {
        let doc = "---\n\"name\": \"Test\", \"picture\": \"p.png\"\n---\n# Board";
        let (meta, body) = extract_front_matter(doc).unwrap();

        assert_eq!(meta.name, "Test");
        assert_eq!(meta.picture.as_deref(), Some("p.png"));
        assert_eq!(body, "\n# Board");
    }

    #[test]
    fn test_empty_front_matter_is_malformed() {
        let result = extract_front_matter("---\n---\n# Todo");
        assert!(matches!(result, Err(RenderError::MalformedDocument)));
    }

    #[test]
    fn test_unclosed_front_matter_is_malformed() {
        let result = extract_front_matter("---\n\"name\": \"Board\"\n# Todo");
        assert!(matches!(result, Err(RenderError::MalformedDocument)));
    }

    #[test]
    fn test_three_line_front_matter_is_malformed() {
        let doc = "---\n\"name\": \"Board\",\n\"a\": 1,\n\"b\": 2\n---\n";
        let result = extract_front_matter(doc);
        assert!(matches!(result, Err(RenderError::MalformedDocument)));
    }

    #[test]
    fn test_delimiter_must_be_whole_line() {
        let doc = "x---\n\"name\": \"Board\",\n\"picture\": \"p\"\n---\n";
        let result = extract_front_matter(doc);
        assert!(matches!(result, Err(RenderError::MalformedDocument)));
    }

    #[test]
    fn test_invalid_json() {
        let doc = "---\nname: Board\npicture: p.png\n---\n# Todo";
        let result = extract_front_matter(doc);
        assert!(matches!(result, Err(RenderError::MalformedMetadata(_))));
    }

    #[test]
    fn test_missing_name() {
        let doc = "---\n\"picture\": \"p.png\",\n\"owner\": \"ops\"\n---\n";
        let err = extract_front_matter(doc).unwrap_err();
        assert!(matches!(err, RenderError::MalformedMetadata(_)));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_name_must_be_string() {
        let doc = "---\n\"name\": 42,\n\"picture\": \"p.png\"\n---\n";
        let result = extract_front_matter(doc);
        assert!(matches!(result, Err(RenderError::MalformedMetadata(_))));
    }

    #[test]
    fn test_only_first_block_is_removed() {
        let block = "---\n\"name\": \"A\",\n\"picture\": \"p\"\n---";
        let doc = format!("{block}\nbetween\n{block}\n");
        let (meta, body) = extract_front_matter(&doc).unwrap();

        assert_eq!(meta.name, "A");
        assert_eq!(body, format!("\nbetween\n{block}\n"));
    }
}
