//! NewsAPI adapter. Implements NewsSearchPort against the `/v2/everything` endpoint.

use crate::domain::{DomainError, NewsQuery, RawArticle};
use crate::ports::NewsSearchPort;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::{debug, warn};

pub const NEWSAPI_EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";

/// News search adapter.
///
/// Requires an API key from https://newsapi.org. The key travels as the
/// `apiKey` query parameter.
pub struct NewsApiAdapter {
    client: Client,
    api_url: String,
    api_key: String,
    user_agent: String,
}

impl NewsApiAdapter {
    pub fn new(api_url: String, api_key: String, user_agent: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            user_agent,
        }
    }
}

#[derive(Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Option<Vec<ApiArticle>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiArticle {
    #[serde(default)]
    source: Option<ApiSource>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
}

#[derive(Deserialize)]
struct ApiSource {
    #[serde(default)]
    name: Option<String>,
}

impl From<ApiArticle> for RawArticle {
    fn from(a: ApiArticle) -> Self {
        RawArticle {
            title: a.title,
            description: a.description,
            published_at: a.published_at,
            source_name: a.source.and_then(|s| s.name),
            url: a.url,
        }
    }
}

#[async_trait::async_trait]
impl NewsSearchPort for NewsApiAdapter {
    async fn search(&self, query: &NewsQuery) -> Result<Vec<RawArticle>, DomainError> {
        let page_size = query.page_size.to_string();
        let res = self
            .client
            .get(&self.api_url)
            .header(USER_AGENT, &self.user_agent)
            .query(&[
                ("q", query.q.as_str()),
                ("searchIn", query.search_in.as_str()),
                ("language", query.language.as_str()),
                ("sortBy", query.sort_by.as_str()),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::NewsSearch(format!("Request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            warn!(status = %status, body = %text, "news API returned error");
            return Err(DomainError::NewsSearch(format!(
                "News API error {}: {}",
                status, text
            )));
        }

        let body: EverythingResponse = res
            .json()
            .await
            .map_err(|e| DomainError::NewsSearch(format!("Failed to parse response: {}", e)))?;

        let articles: Vec<RawArticle> = body
            .articles
            .unwrap_or_default()
            .into_iter()
            .map(RawArticle::from)
            .collect();
        debug!(articles = articles.len(), "news search complete");
        Ok(articles)
    }
}
