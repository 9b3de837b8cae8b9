//! Overpass adapter. Implements BoothLocatorPort by querying OpenStreetMap for
//! schools, colleges, community centres and town halls around a point.

use crate::domain::{DomainError, GeoPoint, OsmPlace};
use crate::ports::BoothLocatorPort;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

pub const OVERPASS_INTERPRETER_URL: &str = "https://overpass-api.de/api/interpreter";

/// Overpass is slow under load; the map falls back to simulated booths past this.
pub const OVERPASS_TIMEOUT: Duration = Duration::from_secs(4);

pub struct OverpassAdapter {
    client: Client,
    api_url: String,
    user_agent: String,
    timeout: Duration,
}

impl OverpassAdapter {
    pub fn new(api_url: String, user_agent: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            user_agent,
            timeout: OVERPASS_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overpass QL for amenity nodes usable as polling stations.
    pub fn booth_query(centre: GeoPoint, radius_m: u32, limit: usize, timeout: Duration) -> String {
        format!(
            r#"[out:json][timeout:{}];(node["amenity"~"school|college|community_centre|townhall"](around:{}, {}, {}););out body {};"#,
            timeout.as_secs().max(1),
            radius_m,
            centre.lat,
            centre.lon,
            limit
        )
    }
}

#[derive(Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Deserialize)]
struct Element {
    id: i64,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[async_trait::async_trait]
impl BoothLocatorPort for OverpassAdapter {
    async fn nearby(
        &self,
        centre: GeoPoint,
        radius_m: u32,
        limit: usize,
    ) -> Result<Vec<OsmPlace>, DomainError> {
        let query = Self::booth_query(centre, radius_m, limit, self.timeout);
        debug!(lat = centre.lat, lon = centre.lon, radius_m, "querying overpass");

        let res = self
            .client
            .get(&self.api_url)
            .header(USER_AGENT, &self.user_agent)
            .query(&[("data", query.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DomainError::Geo(format!("Overpass request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            return Err(DomainError::Geo(format!("Overpass error {}", status)));
        }

        let body: OverpassResponse = res
            .json()
            .await
            .map_err(|e| DomainError::Geo(format!("Failed to parse Overpass response: {}", e)))?;

        Ok(body
            .elements
            .into_iter()
            .filter_map(|el| {
                let (lat, lon) = (el.lat?, el.lon?);
                Some(OsmPlace {
                    id: el.id,
                    lat,
                    lon,
                    name: el.tags.get("name").cloned(),
                })
            })
            .collect())
    }
}
