//! Cover image lookup
//!
//! A best-effort capability: given a title, maybe return an image URL. The
//! providers report failures as errors; `lookup_cover` is the host-side
//! boundary that bounds the wait, logs the cause and turns everything into
//! "no image".

mod anilist;
mod error;

pub use anilist::{AniListClient, ANILIST_ENDPOINT};
pub use error::CoverError;

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::timeout;

/// Source of cover image URLs
#[async_trait]
pub trait CoverSource: Send + Sync {
    /// `Ok(None)` means the source answered but has no image for `title`
    async fn find_cover(&self, title: &str) -> Result<Option<String>, CoverError>;
}

/// Source used when lookups are switched off
pub struct NoCovers;

#[async_trait]
impl CoverSource for NoCovers {
    async fn find_cover(&self, _title: &str) -> Result<Option<String>, CoverError> {
        Ok(None)
    }
}

/// Remembers found covers for the life of the process.
///
/// Only hits are cached; misses and failures are retried next time.
pub struct CachedCoverSource<S> {
    inner: S,
    cache: RwLock<HashMap<String, String>>,
}

impl<S: CoverSource> CachedCoverSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<S: CoverSource> CoverSource for CachedCoverSource<S> {
    async fn find_cover(&self, title: &str) -> Result<Option<String>, CoverError> {
        if let Some(url) = self.cache.read().await.get(title) {
            return Ok(Some(url.clone()));
        }

        let found = self.inner.find_cover(title).await?;
        if let Some(url) = &found {
            self.cache
                .write()
                .await
                .insert(title.to_string(), url.clone());
        }
        Ok(found)
    }
}

/// Look up a cover, waiting at most `limit`.
///
/// Never fails: errors and timeouts are logged and reported as `None`.
pub async fn lookup_cover(source: &dyn CoverSource, title: &str, limit: Duration) -> Option<String> {
    match timeout(limit, source.find_cover(title)).await {
        Ok(Ok(url)) => url,
        Ok(Err(e)) => {
            tracing::warn!(title = %title, error = %e, "Cover lookup failed");
            None
        }
        Err(_) => {
            tracing::warn!(title = %title, timeout_ms = %limit.as_millis(), "Cover lookup timed out");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Answers from a fixed table and counts calls
    struct TableSource {
        table: HashMap<String, String>,
        calls: Arc<AtomicUsize>,
    }

    impl TableSource {
        fn new(entries: &[(&str, &str)]) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let table = entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect();
            (
                Self {
                    table,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl CoverSource for TableSource {
        async fn find_cover(&self, title: &str) -> Result<Option<String>, CoverError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.table.get(title).cloned())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl CoverSource for FailingSource {
        async fn find_cover(&self, _title: &str) -> Result<Option<String>, CoverError> {
            Err(CoverError::Status { status: 500 })
        }
    }

    struct SlowSource;

    #[async_trait]
    impl CoverSource for SlowSource {
        async fn find_cover(&self, _title: &str) -> Result<Option<String>, CoverError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Some("https://img/late.jpg".to_string()))
        }
    }

    #[tokio::test]
    async fn test_cache_stores_hits_only() {
        let (source, calls) = TableSource::new(&[("BERSERK", "https://img/b.jpg")]);
        let cached = CachedCoverSource::new(source);

        for _ in 0..3 {
            let url = cached.find_cover("BERSERK").await.unwrap();
            assert_eq!(url.as_deref(), Some("https://img/b.jpg"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        for _ in 0..2 {
            assert_eq!(cached.find_cover("unknown").await.unwrap(), None);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failure_becomes_none() {
        let url = lookup_cover(&FailingSource, "BERSERK", Duration::from_secs(1)).await;
        assert_eq!(url, None);
    }

    #[tokio::test]
    async fn test_timeout_becomes_none() {
        let url = lookup_cover(&SlowSource, "BERSERK", Duration::from_millis(20)).await;
        assert_eq!(url, None);
    }

    #[tokio::test]
    async fn test_disabled_source() {
        assert_eq!(lookup_cover(&NoCovers, "BERSERK", Duration::from_secs(1)).await, None);
    }
}
