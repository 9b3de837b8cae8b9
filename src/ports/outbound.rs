//! Outbound ports. Application calls into upstream services.
//!
//! Implemented by adapters. Each call is a single, unretried request.

use crate::domain::{ChatTurn, DomainError, GeoPoint, NewsQuery, OsmPlace, PlaceSuggestion, RawArticle};

/// Hosted LLM completion endpoint.
#[async_trait::async_trait]
pub trait LlmPort: Send + Sync {
    /// Send a conversation and return the text of the first choice.
    ///
    /// Non-success upstream statuses are returned as `DomainError::Llm` carrying
    /// the status and the upstream body text.
    async fn complete(&self, turns: &[ChatTurn], temperature: f32) -> Result<String, DomainError>;
}

/// Hosted news-search API.
#[async_trait::async_trait]
pub trait NewsSearchPort: Send + Sync {
    /// Run a keyword search. An empty vector means the provider had no articles.
    async fn search(&self, query: &NewsQuery) -> Result<Vec<RawArticle>, DomainError>;
}

/// Finds places near a coordinate that can serve as polling booths.
#[async_trait::async_trait]
pub trait BoothLocatorPort: Send + Sync {
    /// Return at most `limit` places within `radius_m` metres of `centre`.
    async fn nearby(
        &self,
        centre: GeoPoint,
        radius_m: u32,
        limit: usize,
    ) -> Result<Vec<OsmPlace>, DomainError>;
}

/// Free-text place search (autosuggest).
#[async_trait::async_trait]
pub trait GeocoderPort: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PlaceSuggestion>, DomainError>;
}
