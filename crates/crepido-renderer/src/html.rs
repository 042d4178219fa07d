//! Page skeleton around a rendered board.

use std::fmt::Write;

use crate::frontmatter::Metadata;
use crate::util::escape_html;

/// Icon font used by checkbox, timer and label markup.
pub const FONT_AWESOME_STYLESHEET: &str =
    "https://maxcdn.bootstrapcdn.com/font-awesome/4.3.0/css/font-awesome.min.css";

/// Board stylesheet served from the assets directory.
pub const BOARD_STYLESHEET: &str = "/assets/stylesheets/style.css";

/// HTML page shell.
///
/// Produces the `<html>` document with a head (title, viewport, stylesheet
/// links) and the `crepido` > `board` container holding the board header and
/// the rendered content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageShell {
    stylesheets: Vec<String>,
}

impl PageShell {
    /// Create a shell linking the given stylesheets, in order.
    #[must_use]
    pub fn new(stylesheets: Vec<String>) -> Self {
        Self { stylesheets }
    }

    /// Stylesheet URLs linked from the page head.
    #[must_use]
    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    /// Wrap rendered board content in the page skeleton.
    ///
    /// Name and picture come from the board front matter and are escaped.
    /// The picture link is omitted when no picture is set.
    #[must_use]
    pub fn wrap(&self, metadata: &Metadata, content: &str) -> String {
        let name = escape_html(&metadata.name);
        let mut out = String::with_capacity(content.len() + 1024);

        write!(out, "<html><head><title>{name}</title>").unwrap();
        out.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#);
        for href in &self.stylesheets {
            write!(out, r#"<link rel="stylesheet" href="{}">"#, escape_html(href)).unwrap();
        }
        out.push_str("</head><body>");

        out.push_str(r#"<div class="crepido"><div class="board"><div class="board__header">"#);
        if let Some(picture) = &metadata.picture {
            write!(
                out,
                r##"<a href="#" class="board__picture"><img src="{}"></a>"##,
                escape_html(picture)
            )
            .unwrap();
        }
        write!(out, r#"<h3 class="board__name">{name}</h3></div>"#).unwrap();
        out.push_str(content);
        out.push_str("</div></div></body></html>");
        out
    }
}

impl Default for PageShell {
    fn default() -> Self {
        Self::new(vec![
            FONT_AWESOME_STYLESHEET.to_owned(),
            BOARD_STYLESHEET.to_owned(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn metadata(name: &str, picture: Option<&str>) -> Metadata {
        Metadata {
            name: name.to_owned(),
            picture: picture.map(str::to_owned),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_wrap_default_shell() {
        let html = PageShell::default().wrap(&metadata("Sprint", Some("p.png")), "<p>x</p>");

        assert_eq!(
            html,
            concat!(
                "<html><head><title>Sprint</title>",
                r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
                r#"<link rel="stylesheet" href="https://maxcdn.bootstrapcdn.com/font-awesome/4.3.0/css/font-awesome.min.css">"#,
                r#"<link rel="stylesheet" href="/assets/stylesheets/style.css">"#,
                "</head><body>",
                r#"<div class="crepido"><div class="board"><div class="board__header">"#,
                r##"<a href="#" class="board__picture"><img src="p.png"></a>"##,
                r#"<h3 class="board__name">Sprint</h3></div>"#,
                "<p>x</p>",
                "</div></div></body></html>",
            )
        );
    }

    #[test]
    fn test_wrap_without_picture() {
        let html = PageShell::default().wrap(&metadata("Sprint", None), "");

        assert!(!html.contains("board__picture"));
        assert!(html.contains(r#"<div class="board__header"><h3 class="board__name">Sprint</h3></div>"#));
    }

    #[test]
    fn test_wrap_escapes_metadata() {
        let html = PageShell::default().wrap(
            &metadata("<b>Ops</b>", Some(r#"x.png" onload="alert(1)"#)),
            "",
        );

        assert!(html.contains("<title>&lt;b&gt;Ops&lt;/b&gt;</title>"));
        assert!(html.contains(r#"<img src="x.png&quot; onload=&quot;alert(1)">"#));
    }

    #[test]
    fn test_custom_stylesheets() {
        let shell = PageShell::new(vec!["/theme.css".to_owned()]);
        let html = shell.wrap(&metadata("B", None), "");

        assert_eq!(shell.stylesheets(), ["/theme.css".to_owned()]);
        assert_eq!(html.matches("<link").count(), 1);
        assert!(html.contains(r#"<link rel="stylesheet" href="/theme.css">"#));
    }

    #[test]
    fn test_content_is_not_escaped() {
        let html = PageShell::default().wrap(&metadata("B", None), "<div class=\"board__card\"></div>");
        assert!(html.contains("<div class=\"board__card\"></div></div></div></body></html>"));
    }
}
