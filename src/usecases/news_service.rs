//! News aggregator. Fixed election query, quality filter, backup on empty/failed search.

use crate::domain::{DomainError, FallbackCatalog, NewsItem, NewsQuery, RawArticle, Sourced};
use crate::ports::NewsSearchPort;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// Label used in the misconfiguration error body ("API Key missing").
pub const NEWS_CREDENTIAL: &str = "API Key";

/// Marker NewsAPI puts in the title of withdrawn articles.
const REMOVED_MARKER: &str = "[Removed]";

pub struct NewsService {
    /// `None` when no news-search key is configured.
    search: Option<Arc<dyn NewsSearchPort>>,
    query: NewsQuery,
    catalog: Arc<FallbackCatalog>,
}

impl NewsService {
    pub fn new(
        search: Option<Arc<dyn NewsSearchPort>>,
        query: NewsQuery,
        catalog: Arc<FallbackCatalog>,
    ) -> Self {
        Self {
            search,
            query,
            catalog,
        }
    }

    /// Latest headlines.
    ///
    /// # Errors
    /// Only `DomainError::MissingCredential` when the service has no search adapter;
    /// upstream failures degrade to the backup list.
    pub async fn headlines(&self) -> Result<Sourced<Vec<NewsItem>>, DomainError> {
        let Some(search) = &self.search else {
            warn!("news search requested without an API key");
            return Err(DomainError::MissingCredential(NEWS_CREDENTIAL));
        };

        match search.search(&self.query).await {
            Ok(articles) if articles.is_empty() => {
                info!("news search returned no articles, serving backup");
                Ok(Sourced::fallback(
                    self.catalog.news.clone(),
                    "news search returned no articles",
                ))
            }
            Ok(articles) => {
                let received = articles.len();
                let items = shape_articles(articles);
                info!(received, kept = items.len(), "news headlines ready");
                Ok(Sourced::live(items))
            }
            Err(e) => {
                warn!(error = %e, "news search failed, serving backup");
                Ok(Sourced::fallback(self.catalog.news.clone(), e.to_string()))
            }
        }
    }
}

/// Drop unusable articles and map the rest; `id` is the index after filtering.
pub fn shape_articles(articles: Vec<RawArticle>) -> Vec<NewsItem> {
    articles
        .into_iter()
        .filter(is_publishable)
        .enumerate()
        .map(|(index, article)| NewsItem {
            id: index as i64,
            title: article.title.unwrap_or_default(),
            desc: article.description.unwrap_or_default(),
            date: article
                .published_at
                .as_deref()
                .map(format_news_date)
                .unwrap_or_default(),
            source: article.source_name.unwrap_or_default(),
            url: article.url.unwrap_or_default(),
        })
        .collect()
}

fn is_publishable(article: &RawArticle) -> bool {
    let has_text = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
    has_text(&article.title)
        && has_text(&article.description)
        && !article
            .title
            .as_deref()
            .is_some_and(|t| t.contains(REMOVED_MARKER))
}

/// Short Indian-English date ("26 Jan"), in UTC. Unparseable input is passed through.
pub fn format_news_date(published_at: &str) -> String {
    DateTime::parse_from_rfc3339(published_at)
        .map(|dt| dt.with_timezone(&Utc).format("%-d %b").to_string())
        .unwrap_or_else(|_| published_at.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DataSource;

    struct FixedSearch(Result<Vec<RawArticle>, String>);

    #[async_trait::async_trait]
    impl NewsSearchPort for FixedSearch {
        async fn search(&self, _query: &NewsQuery) -> Result<Vec<RawArticle>, DomainError> {
            self.0.clone().map_err(DomainError::NewsSearch)
        }
    }

    fn article(title: &str, desc: &str) -> RawArticle {
        RawArticle {
            title: Some(title.to_string()),
            description: Some(desc.to_string()),
            published_at: Some("2026-01-26T18:30:00Z".to_string()),
            source_name: Some("PTI".to_string()),
            url: Some(format!("https://example.org/{}", title.len())),
        }
    }

    fn service(result: Result<Vec<RawArticle>, String>) -> NewsService {
        NewsService::new(
            Some(Arc::new(FixedSearch(result))),
            NewsQuery::election_india(),
            Arc::new(FallbackCatalog::default()),
        )
    }

    #[tokio::test]
    async fn test_missing_key_is_error() {
        let svc = NewsService::new(
            None,
            NewsQuery::election_india(),
            Arc::new(FallbackCatalog::default()),
        );
        let err = svc.headlines().await.unwrap_err();
        assert_eq!(err.to_string(), "API Key missing");
    }

    #[tokio::test]
    async fn test_no_articles_serves_backup() {
        let out = service(Ok(Vec::new())).headlines().await.unwrap();
        assert_eq!(out.source, DataSource::Fallback);
        let ids: Vec<i64> = out.data.iter().map(|n| n.id).collect();
        assert_eq!(ids, [101, 102, 103]);
    }

    #[tokio::test]
    async fn test_search_error_serves_backup() {
        let out = service(Err("timed out".into())).headlines().await.unwrap();
        assert_eq!(out.data, FallbackCatalog::default().news);
        assert!(out.diagnostic.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_filters_empty_and_removed_titles() {
        let out = service(Ok(vec![
            article("", "no title"),
            article("[Removed]", "withdrawn"),
            article("ECI releases final roll", "Roll published for Bihar"),
        ]))
        .headlines()
        .await
        .unwrap();

        assert_eq!(out.source, DataSource::Live);
        assert_eq!(out.data.len(), 1);
        let item = &out.data[0];
        assert_eq!(item.id, 0);
        assert_eq!(item.title, "ECI releases final roll");
        assert_eq!(item.desc, "Roll published for Bihar");
        assert_eq!(item.source, "PTI");
        assert_eq!(item.date, "26 Jan");
    }

    #[test]
    fn test_missing_description_is_dropped() {
        let mut a = article("Polls", "d");
        a.description = None;
        assert!(shape_articles(vec![a]).is_empty());
    }

    #[test]
    fn test_missing_source_name_is_blank() {
        let mut a = article("Polls", "Phase one");
        a.source_name = None;
        let items = shape_articles(vec![a]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source, "");
    }

    #[test]
    fn test_format_news_date() {
        assert_eq!(format_news_date("2026-03-05T23:59:00+05:30"), "5 Mar");
        assert_eq!(format_news_date("yesterday"), "yesterday");
    }
}
