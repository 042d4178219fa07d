//! Full page rendering for board documents.

use crate::board::render_board;
use crate::error::RenderError;
use crate::frontmatter::{Metadata, extract_front_matter};
use crate::html::PageShell;

/// Result of rendering a board document.
#[derive(Clone, Debug)]
pub struct RenderedDocument {
    /// Complete HTML page.
    pub html: String,
    /// Metadata parsed from the front matter.
    pub metadata: Metadata,
}

/// Renders raw board documents into complete HTML pages.
///
/// Rendering is pure: the same input always yields the same page, and
/// nothing is cached or written here.
#[derive(Clone, Debug, Default)]
pub struct DocumentRenderer {
    shell: PageShell,
}

impl DocumentRenderer {
    /// Create a renderer with the default page shell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom page shell.
    #[must_use]
    pub fn with_shell(mut self, shell: PageShell) -> Self {
        self.shell = shell;
        self
    }

    /// Page shell used to wrap rendered boards.
    #[must_use]
    pub fn shell(&self) -> &PageShell {
        &self.shell
    }

    /// Render a raw board document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MalformedDocument`] when the front matter block
    /// is missing and [`RenderError::MalformedMetadata`] when it does not
    /// parse.
    pub fn render(&self, raw: &str) -> Result<RenderedDocument, RenderError> {
        let (metadata, body) = extract_front_matter(raw)?;
        let content = render_board(&body);
        let html = self.shell.wrap(&metadata, &content);

        tracing::trace!(name = %metadata.name, bytes = html.len(), "Rendered board");

        Ok(RenderedDocument { html, metadata })
    }
}
