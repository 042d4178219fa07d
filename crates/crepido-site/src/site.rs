//! Cache-consulting board service.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crepido_renderer::DocumentRenderer;

use crate::error::SiteError;
use crate::page_cache::{NullPageCache, PageCache, RenderCache};
use crate::path::resolve_board_path;

/// Result of serving a board.
#[derive(Clone, Debug)]
pub struct BoardPage {
    /// Resolved board file, also used as the cache key.
    pub source_path: PathBuf,
    /// Rendered HTML page.
    pub html: Arc<str>,
    /// Whether the page was served from cache.
    pub from_cache: bool,
}

/// Configuration for [`Site`].
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Directory holding board files.
    pub boards_dir: PathBuf,
    /// Board file extension, without the dot.
    pub extension: String,
    /// Maximum age of cached pages.
    ///
    /// If `None`, caching is disabled.
    pub cache_max_age: Option<Duration>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            boards_dir: PathBuf::from("boards"),
            extension: "md".to_owned(),
            cache_max_age: Some(crate::page_cache::DEFAULT_MAX_AGE),
        }
    }
}

/// Board service: resolve, look up, read, render and cache.
///
/// A failed render never produces a cache entry. Concurrent misses for the
/// same board may render twice; the later insert wins.
pub struct Site {
    boards_dir: PathBuf,
    extension: String,
    renderer: DocumentRenderer,
    cache: Box<dyn PageCache>,
}

impl Site {
    /// Create a site serving boards with the given renderer.
    #[must_use]
    pub fn new(config: SiteConfig, renderer: DocumentRenderer) -> Self {
        let cache: Box<dyn PageCache> = match config.cache_max_age {
            Some(max_age) => Box::new(RenderCache::new(max_age)),
            None => Box::new(NullPageCache),
        };

        Self {
            boards_dir: config.boards_dir,
            extension: config.extension,
            renderer,
            cache,
        }
    }

    /// Directory holding board files.
    #[must_use]
    pub fn boards_dir(&self) -> &Path {
        &self.boards_dir
    }

    /// Resolve a request path to a board file.
    #[must_use]
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        resolve_board_path(&self.boards_dir, request_path, &self.extension)
    }

    /// Serve the board for a request path.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::DocumentNotFound`] if the path does not resolve or
    /// the file does not exist, [`SiteError::Io`] if it cannot be read and
    /// [`SiteError::Render`] if it is not a valid board.
    pub fn render(&self, request_path: &str) -> Result<BoardPage, SiteError> {
        let source_path = self
            .resolve(request_path)
            .ok_or_else(|| SiteError::DocumentNotFound(PathBuf::from(request_path)))?;
        let key = source_path.to_string_lossy().into_owned();

        if let Some(cached) = self.cache.lookup(&key) {
            tracing::debug!(path = %source_path.display(), "Serving cached board");
            return Ok(BoardPage {
                source_path,
                html: cached.html,
                from_cache: true,
            });
        }

        let raw = std::fs::read_to_string(&source_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound | ErrorKind::IsADirectory => {
                SiteError::DocumentNotFound(source_path.clone())
            }
            _ => SiteError::Io(e),
        })?;

        let document = self.renderer.render(&raw).inspect_err(|e| {
            tracing::warn!(path = %source_path.display(), error = %e, "Failed to render board");
        })?;

        let html: Arc<str> = Arc::from(document.html);
        self.cache.insert(&key, Arc::clone(&html), Instant::now());
        tracing::debug!(path = %source_path.display(), name = %document.metadata.name, "Rendered board");

        Ok(BoardPage {
            source_path,
            html,
            from_cache: false,
        })
    }

    /// Remove expired pages from the cache.
    ///
    /// Returns the number of pages removed.
    pub fn collect_garbage(&self) -> usize {
        self.cache.collect_garbage(Instant::now())
    }

    /// Number of cached pages.
    #[must_use]
    pub fn cached_pages(&self) -> usize {
        self.cache.len()
    }
}
