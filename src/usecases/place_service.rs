//! Place autosuggest for the booth map search box.

use crate::domain::{PlaceSuggestion, Sourced};
use crate::ports::GeocoderPort;
use std::sync::Arc;
use tracing::error;

/// Queries shorter than this are answered with no suggestions and no upstream call.
pub const MIN_QUERY_CHARS: usize = 3;
pub const SUGGESTION_LIMIT: usize = 5;

pub struct PlaceService {
    geocoder: Arc<dyn GeocoderPort>,
}

impl PlaceService {
    pub fn new(geocoder: Arc<dyn GeocoderPort>) -> Self {
        Self { geocoder }
    }

    pub async fn suggest(&self, query: &str) -> Sourced<Vec<PlaceSuggestion>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Sourced::live(Vec::new());
        }

        match self.geocoder.search(query, SUGGESTION_LIMIT).await {
            Ok(places) => Sourced::live(places),
            Err(e) => {
                error!(error = %e, query, "autosuggest failed");
                Sourced::fallback(Vec::new(), e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataSource, DomainError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGeocoder {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl GeocoderPort for CountingGeocoder {
        async fn search(
            &self,
            query: &str,
            _limit: usize,
        ) -> Result<Vec<PlaceSuggestion>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DomainError::Geo("503".into()));
            }
            Ok(vec![PlaceSuggestion {
                display_name: query.to_string(),
                lat: 1.0,
                lon: 2.0,
            }])
        }
    }

    #[tokio::test]
    async fn test_short_query_skips_upstream() {
        let geocoder = Arc::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let out = PlaceService::new(geocoder.clone()).suggest(" ab ").await;

        assert!(out.data.is_empty());
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_query_is_trimmed_and_forwarded() {
        let geocoder = Arc::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let out = PlaceService::new(geocoder).suggest("  Pune ").await;
        assert_eq!(out.data[0].display_name, "Pune");
    }

    #[tokio::test]
    async fn test_failure_yields_empty_fallback() {
        let geocoder = Arc::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let out = PlaceService::new(geocoder).suggest("Pune").await;
        assert_eq!(out.source, DataSource::Fallback);
        assert!(out.data.is_empty());
    }
}
