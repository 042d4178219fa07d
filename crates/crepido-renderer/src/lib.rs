//! Board document renderer.
//!
//! Turns a board file (a short JSON front matter block followed by a
//! markdown body) into a complete HTML page.
//!
//! # Architecture
//!
//! - [`extract_front_matter`]: splits the raw document into [`Metadata`] and body
//! - [`render_board`]: renders the body, grouping each level-1 heading and the
//!   blocks after it into a card container
//! - [`syntax`]: bracket syntax rewriters applied to list markup (checkboxes,
//!   timers, labels)
//! - [`PageShell`]: wraps the rendered body in the page skeleton
//!
//! [`DocumentRenderer`] ties these together.
//!
//! # Example
//!
//! ```
//! use crepido_renderer::DocumentRenderer;
//!
//! let board = "---\n\"name\": \"Sprint\", \"picture\": \"logo.png\",\n\"owner\": \"ops\"\n---\n# Todo\n- [ ] write docs [2h]\n";
//! let page = DocumentRenderer::new().render(board).unwrap();
//!
//! assert_eq!(page.metadata.name, "Sprint");
//! assert!(page.html.contains(r#"<span class="timer" data-value="2">"#));
//! ```

mod board;
mod error;
mod frontmatter;
mod html;
mod renderer;
pub mod syntax;
mod util;

pub use board::{parser_options, render_board};
pub use error::RenderError;
pub use frontmatter::{Metadata, extract_front_matter};
pub use html::{BOARD_STYLESHEET, FONT_AWESOME_STYLESHEET, PageShell};
pub use renderer::{DocumentRenderer, RenderedDocument};
pub use util::{escape_html, slugify};
