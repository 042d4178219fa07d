//! Periodic render cache garbage collection.

use std::sync::Arc;
use std::time::Duration;

use crepido_site::Site;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawn a task sweeping expired pages from the site cache every `interval`.
///
/// The first sweep runs one interval after spawning. The task runs until
/// aborted.
pub(crate) fn spawn_gc(site: Arc<Site>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = site.collect_garbage();
            tracing::debug!(removed, remaining = site.cached_pages(), "Cache sweep");
        }
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crepido_renderer::DocumentRenderer;
    use crepido_site::SiteConfig;
    use pretty_assertions::assert_eq;

    use super::*;

    fn site_with_cached_board(max_age: Duration) -> (tempfile::TempDir, Arc<Site>) {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join("index.md"),
            "---\n\"name\": \"Home\"\n---\n# Todo\n",
        )
        .unwrap();
        let config = SiteConfig {
            boards_dir: temp_dir.path().to_path_buf(),
            cache_max_age: Some(max_age),
            ..SiteConfig::default()
        };
        let site = Arc::new(Site::new(config, DocumentRenderer::new()));
        site.render("/").unwrap();
        (temp_dir, site)
    }

    #[tokio::test(start_paused = true)]
    async fn test_gc_task_sweeps_expired_pages() {
        let (_temp_dir, site) = site_with_cached_board(Duration::ZERO);
        assert_eq!(site.cached_pages(), 1);

        let handle = spawn_gc(Arc::clone(&site), Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(61)).await;

        assert_eq!(site.cached_pages(), 0);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_gc_task_waits_one_interval() {
        let (_temp_dir, site) = site_with_cached_board(Duration::ZERO);

        let handle = spawn_gc(Arc::clone(&site), Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(site.cached_pages(), 1);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_gc_task_keeps_fresh_pages() {
        let (_temp_dir, site) = site_with_cached_board(Duration::from_secs(3600));

        let handle = spawn_gc(Arc::clone(&site), Duration::from_secs(1));
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(site.cached_pages(), 1);
        handle.abort();
    }
}
