//! Board body rendering.
//!
//! A board body is a sequence of cards. Every top-level `#` heading starts a
//! card, and the card holds everything up to the next top-level `#` heading:
//!
//! ```text
//! # Doing [-]          <div class="board__card board__card--collapsible board__card--doing">
//! - [ ] item [2h]   ->   <h1>Doing</h1>
//!                        <ul>...</ul>
//!                      </div>
//! ```
//!
//! Rendering happens in two phases. [`split_sections`] groups the event
//! stream into [`Section`]s, then each section renders as a unit that opens
//! and closes its own card. Content before the first heading renders without
//! a card. Top-level lists are rendered whole and passed through
//! [`syntax::transform`](crate::syntax::transform).

use std::fmt::Write;
use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;

use crate::syntax;
use crate::util::{escape_html, heading_level_to_num, slugify};

static COLLAPSIBLE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[-\]\s?").unwrap());

/// Markdown extensions enabled for board bodies.
///
/// Task lists stay disabled: `[ ]` and `[x]` are handled by the bracket
/// syntax instead.
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_STRIKETHROUGH
}

/// Render a board body (front matter already removed) to HTML.
#[must_use]
pub fn render_board(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, parser_options());
    let mut output = String::with_capacity(markdown.len() * 2);
    for section in split_sections(parser) {
        section.render(&mut output);
    }
    output
}

/// A card heading and the blocks that follow it.
#[derive(Debug, Default)]
pub(crate) struct Section<'a> {
    /// Inline events of the level-1 heading, `None` for leading content.
    pub heading: Option<Vec<Event<'a>>>,
    /// Block events up to the next card heading.
    pub body: Vec<Event<'a>>,
}

impl Section<'_> {
    fn is_empty(&self) -> bool {
        self.heading.is_none() && self.body.is_empty()
    }

    fn render(&self, out: &mut String) {
        let mut writer = HtmlWriter::new();
        writer.write_events(&self.body);
        let body = writer.finish();

        match &self.heading {
            Some(events) => {
                let card = CardHeading::from_events(events);
                card.write_open(out);
                out.push_str(&body);
                out.push_str("</div>\n");
            }
            None => out.push_str(&body),
        }
    }
}

/// Group an event stream into card sections.
///
/// Only level-1 headings at the top level start a new section; a `#` heading
/// nested in a blockquote or list item stays part of the current body.
pub(crate) fn split_sections<'a>(events: impl IntoIterator<Item = Event<'a>>) -> Vec<Section<'a>> {
    let mut sections = Vec::new();
    let mut current = Section::default();
    let mut heading: Option<Vec<Event<'a>>> = None;
    let mut depth = 0usize;

    for event in events {
        if heading.is_some() {
            if matches!(event, Event::End(TagEnd::Heading(HeadingLevel::H1))) {
                current.heading = heading.take();
            } else if let Some(buf) = heading.as_mut() {
                buf.push(event);
            }
            continue;
        }

        match &event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) if depth == 0 => {
                if !current.is_empty() {
                    sections.push(std::mem::take(&mut current));
                }
                heading = Some(Vec::new());
                continue;
            }
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
        current.body.push(event);
    }

    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

/// Rendered level-1 heading of a card.
#[derive(Debug, PartialEq)]
pub(crate) struct CardHeading {
    pub html: String,
    pub slug: String,
    pub collapsible: bool,
}

impl CardHeading {
    pub(crate) fn from_events(events: &[Event<'_>]) -> Self {
        let mut text = String::new();
        for event in events {
            if let Event::Text(t) | Event::Code(t) = event {
                text.push_str(t);
            }
        }

        let mut writer = HtmlWriter::new();
        writer.write_events(events);
        let html = writer.finish();

        let collapsible = text.contains("[-]");
        let (html, text) = if collapsible {
            (
                COLLAPSIBLE_MARKER.replace_all(&html, "").into_owned(),
                COLLAPSIBLE_MARKER.replace_all(&text, "").into_owned(),
            )
        } else {
            (html, text)
        };

        Self {
            html: html.trim().to_owned(),
            slug: slugify(text.trim()),
            collapsible,
        }
    }

    fn write_open(&self, out: &mut String) {
        out.push_str(r#"<div class="board__card"#);
        if self.collapsible {
            out.push_str(" board__card--collapsible");
        }
        write!(
            out,
            r#" board__card--{}"><h1>{}</h1>"#,
            escape_html(&self.slug),
            self.html
        )
        .unwrap();
        out.push('\n');
    }
}

struct PendingImage {
    src: String,
    title: String,
    alt: String,
    nested: usize,
}

/// Event-to-HTML writer for card bodies.
///
/// Output of a top-level list is held back until the list closes, then the
/// whole list runs through the bracket syntax rewriters.
struct HtmlWriter {
    output: String,
    list_buffer: String,
    list_depth: usize,
    image: Option<PendingImage>,
}

impl HtmlWriter {
    fn new() -> Self {
        Self {
            output: String::new(),
            list_buffer: String::new(),
            list_depth: 0,
            image: None,
        }
    }

    fn finish(self) -> String {
        self.output
    }

    fn out(&mut self) -> &mut String {
        if self.list_depth > 0 {
            &mut self.list_buffer
        } else {
            &mut self.output
        }
    }

    fn write_events(&mut self, events: &[Event<'_>]) {
        for event in events {
            if self.image.is_some() {
                self.image_event(event);
            } else {
                self.event(event);
            }
        }
    }

    fn event(&mut self, event: &Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.out().push_str(&escape_html(text)),
            Event::Code(code) => {
                let code = escape_html(code);
                write!(self.out(), "<code>{code}</code>").unwrap();
            }
            Event::Html(html) | Event::InlineHtml(html) => self.out().push_str(html),
            Event::SoftBreak => self.out().push('\n'),
            Event::HardBreak => self.out().push_str("<br>\n"),
            Event::Rule => self.out().push_str("<hr>\n"),
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: &Tag<'_>) {
        match tag {
            Tag::Paragraph => self.out().push_str("<p>"),
            Tag::Heading { level, .. } => {
                let level = heading_level_to_num(*level);
                write!(self.out(), "<h{level}>").unwrap();
            }
            Tag::BlockQuote(_) => self.out().push_str("<blockquote>\n"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next(),
                    CodeBlockKind::Indented => None,
                };
                match lang {
                    Some(lang) => {
                        let lang = escape_html(lang);
                        write!(self.out(), r#"<pre><code class="language-{lang}">"#).unwrap();
                    }
                    None => self.out().push_str("<pre><code>"),
                }
            }
            Tag::List(start) => {
                self.list_depth += 1;
                match start {
                    None => self.out().push_str("<ul>\n"),
                    Some(1) => self.out().push_str("<ol>\n"),
                    Some(n) => writeln!(self.out(), "<ol start=\"{n}\">").unwrap(),
                }
            }
            Tag::Item => self.out().push_str("<li>"),
            Tag::Emphasis => self.out().push_str("<em>"),
            Tag::Strong => self.out().push_str("<strong>"),
            Tag::Strikethrough => self.out().push_str("<del>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let href = escape_html(dest_url);
                if title.is_empty() {
                    write!(self.out(), r#"<a href="{href}">"#).unwrap();
                } else {
                    let title = escape_html(title);
                    write!(self.out(), r#"<a href="{href}" title="{title}">"#).unwrap();
                }
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some(PendingImage {
                    src: dest_url.to_string(),
                    title: title.to_string(),
                    alt: String::new(),
                    nested: 0,
                });
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: &TagEnd) {
        match tag {
            TagEnd::Paragraph => self.out().push_str("</p>\n"),
            TagEnd::Heading(level) => {
                let level = heading_level_to_num(*level);
                writeln!(self.out(), "</h{level}>").unwrap();
            }
            TagEnd::BlockQuote(_) => self.out().push_str("</blockquote>\n"),
            TagEnd::CodeBlock => self.out().push_str("</code></pre>\n"),
            TagEnd::List(ordered) => {
                self.out()
                    .push_str(if *ordered { "</ol>\n" } else { "</ul>\n" });
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 {
                    let list = std::mem::take(&mut self.list_buffer);
                    self.output.push_str(&syntax::transform(&list));
                }
            }
            TagEnd::Item => self.out().push_str("</li>\n"),
            TagEnd::Emphasis => self.out().push_str("</em>"),
            TagEnd::Strong => self.out().push_str("</strong>"),
            TagEnd::Strikethrough => self.out().push_str("</del>"),
            TagEnd::Link => self.out().push_str("</a>"),
            _ => {}
        }
    }

    /// Collect alt text while inside an image; markup is dropped.
    fn image_event(&mut self, event: &Event<'_>) {
        let Some(image) = self.image.as_mut() else {
            return;
        };
        match event {
            Event::Text(text) | Event::Code(text) => image.alt.push_str(text),
            Event::Start(Tag::Image { .. }) => image.nested += 1,
            Event::End(TagEnd::Image) if image.nested > 0 => image.nested -= 1,
            Event::End(TagEnd::Image) => {
                if let Some(image) = self.image.take() {
                    self.write_image(&image);
                }
            }
            _ => {}
        }
    }

    fn write_image(&mut self, image: &PendingImage) {
        let src = escape_html(&image.src);
        let alt = escape_html(&image.alt);
        if image.title.is_empty() {
            write!(self.out(), r#"<img src="{src}" alt="{alt}">"#).unwrap();
        } else {
            let title = escape_html(&image.title);
            write!(self.out(), r#"<img src="{src}" alt="{alt}" title="{title}">"#).unwrap();
        }
    }
}
