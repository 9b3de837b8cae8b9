//! Time-based revalidation for news search results.
//!
//! Wraps another `NewsSearchPort` and reuses the last non-empty result for the
//! same query until it is older than the revalidation window.

use crate::domain::{DomainError, NewsQuery, RawArticle};
use crate::ports::NewsSearchPort;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Default revalidation window (one hour).
pub const DEFAULT_REVALIDATE_SECS: u64 = 3600;

struct CachedSearch {
    query: NewsQuery,
    fetched_at: Instant,
    articles: Vec<RawArticle>,
}

pub struct RevalidatingNewsSearch {
    inner: Arc<dyn NewsSearchPort>,
    window: Duration,
    slot: RwLock<Option<CachedSearch>>,
}

impl RevalidatingNewsSearch {
    pub fn new(inner: Arc<dyn NewsSearchPort>, window: Duration) -> Self {
        Self {
            inner,
            window,
            slot: RwLock::new(None),
        }
    }
}

#[async_trait::async_trait]
impl NewsSearchPort for RevalidatingNewsSearch {
    async fn search(&self, query: &NewsQuery) -> Result<Vec<RawArticle>, DomainError> {
        {
            let slot = self.slot.read().await;
            if let Some(cached) = slot.as_ref() {
                if cached.query == *query && cached.fetched_at.elapsed() < self.window {
                    debug!(
                        age_secs = cached.fetched_at.elapsed().as_secs(),
                        "serving revalidated news search"
                    );
                    return Ok(cached.articles.clone());
                }
            }
        }

        let articles = self.inner.search(query).await?;
        // Empty and failed results are never stored, so the next call retries upstream.
        if !articles.is_empty() {
            *self.slot.write().await = Some(CachedSearch {
                query: query.clone(),
                fetched_at: Instant::now(),
                articles: articles.clone(),
            });
        }
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSearch {
        calls: AtomicUsize,
        articles: Vec<RawArticle>,
    }

    #[async_trait::async_trait]
    impl NewsSearchPort for CountingSearch {
        async fn search(&self, _query: &NewsQuery) -> Result<Vec<RawArticle>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.articles.clone())
        }
    }

    fn article(title: &str) -> RawArticle {
        RawArticle {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_reuses_result_within_window() {
        let inner = Arc::new(CountingSearch {
            calls: AtomicUsize::new(0),
            articles: vec![article("a")],
        });
        let search = RevalidatingNewsSearch::new(inner.clone(), Duration::from_secs(60));
        let query = NewsQuery::election_india();

        search.search(&query).await.unwrap();
        let second = search.search(&query).await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second, vec![article("a")]);
    }

    #[tokio::test]
    async fn test_zero_window_always_refetches() {
        let inner = Arc::new(CountingSearch {
            calls: AtomicUsize::new(0),
            articles: vec![article("a")],
        });
        let search = RevalidatingNewsSearch::new(inner.clone(), Duration::ZERO);
        let query = NewsQuery::election_india();

        search.search(&query).await.unwrap();
        search.search(&query).await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_results_are_not_kept() {
        let inner = Arc::new(CountingSearch {
            calls: AtomicUsize::new(0),
            articles: Vec::new(),
        });
        let search = RevalidatingNewsSearch::new(inner.clone(), Duration::from_secs(60));
        let query = NewsQuery::election_india();

        search.search(&query).await.unwrap();
        search.search(&query).await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }
}
