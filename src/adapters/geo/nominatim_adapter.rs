//! Nominatim adapter. Implements GeocoderPort (place autosuggest).

use crate::domain::{DomainError, PlaceSuggestion};
use crate::ports::GeocoderPort;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::debug;

pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim's usage policy requires an identifying User-Agent.
pub struct NominatimAdapter {
    client: Client,
    api_url: String,
    user_agent: String,
}

impl NominatimAdapter {
    pub fn new(api_url: String, user_agent: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            user_agent,
        }
    }
}

/// Nominatim returns coordinates as strings.
#[derive(Deserialize)]
struct SearchHit {
    display_name: String,
    lat: String,
    lon: String,
}

#[async_trait::async_trait]
impl GeocoderPort for NominatimAdapter {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PlaceSuggestion>, DomainError> {
        let limit = limit.to_string();
        let res = self
            .client
            .get(&self.api_url)
            .header(USER_AGENT, &self.user_agent)
            .query(&[
                ("format", "json"),
                ("q", query),
                ("addressdetails", "1"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Geo(format!("Nominatim request failed: {}", e)))?;

        if !res.status().is_success() {
            return Err(DomainError::Geo(format!("Nominatim error {}", res.status())));
        }

        let hits: Vec<SearchHit> = res
            .json()
            .await
            .map_err(|e| DomainError::Geo(format!("Failed to parse Nominatim response: {}", e)))?;

        let suggestions: Vec<PlaceSuggestion> = hits
            .into_iter()
            .filter_map(|hit| {
                Some(PlaceSuggestion {
                    lat: hit.lat.parse().ok()?,
                    lon: hit.lon.parse().ok()?,
                    display_name: hit.display_name,
                })
            })
            .collect();
        debug!(query, hits = suggestions.len(), "place search complete");
        Ok(suggestions)
    }
}
