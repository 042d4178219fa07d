//! Board serving for Crepido.
//!
//! This crate provides:
//! - [`Site`]: resolves request paths to board files and renders them through
//!   a [`PageCache`]
//! - [`RenderCache`]: in-memory page cache with age-based garbage collection
//! - [`resolve_board_path`]: request path to board file mapping
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use crepido_renderer::DocumentRenderer;
//! use crepido_site::{Site, SiteConfig};
//!
//! let site = Site::new(SiteConfig::default(), DocumentRenderer::new());
//!
//! // Renders boards/sprint.md, or serves it from cache
//! let page = site.render("/sprint")?;
//!
//! // Periodically drop stale pages
//! site.collect_garbage();
//! # Ok(())
//! # }
//! ```

mod error;
mod page_cache;
mod path;
mod site;

pub use error::SiteError;
pub use page_cache::{CacheEntry, DEFAULT_MAX_AGE, NullPageCache, PageCache, RenderCache};
pub use path::{INDEX_BOARD, resolve_board_path};
pub use site::{BoardPage, Site, SiteConfig};
