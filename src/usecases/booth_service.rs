//! Polling booth locator. Real OpenStreetMap places when available, simulated booths otherwise.

use crate::domain::fallback::UNNAMED_BOOTH;
use crate::domain::{Booth, DomainError, FallbackCatalog, GeoPoint, OsmPlace, Sourced, WaitLevel};
use crate::ports::BoothLocatorPort;
use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

pub const DEFAULT_SEARCH_RADIUS_M: u32 = 1000;
pub const DEFAULT_BOOTH_LIMIT: usize = 6;

/// Simulated booths are scattered up to this many degrees from the centre.
pub const SIMULATION_SPREAD_DEG: f64 = 0.007;

const OFFICIAL_BOOTH: &str = "OFFICIAL BOOTH";
const SIMULATED_BOOTH: &str = "POLLING STATION";

pub struct BoothService {
    locator: Arc<dyn BoothLocatorPort>,
    catalog: Arc<FallbackCatalog>,
    radius_m: u32,
    limit: usize,
}

impl BoothService {
    pub fn new(
        locator: Arc<dyn BoothLocatorPort>,
        catalog: Arc<FallbackCatalog>,
        radius_m: u32,
        limit: usize,
    ) -> Self {
        Self {
            locator,
            catalog,
            radius_m,
            limit,
        }
    }

    pub async fn nearby(&self, centre: GeoPoint) -> Sourced<Vec<Booth>> {
        let found = match self.locator.nearby(centre, self.radius_m, self.limit).await {
            Ok(places) if places.is_empty() => {
                Err(DomainError::Geo("no places found near centre".to_string()))
            }
            other => other,
        };

        match found {
            Ok(places) => {
                info!(booths = places.len(), "official booths found");
                Sourced::live(official_booths(places))
            }
            Err(e) => {
                warn!(error = %e, lat = centre.lat, lon = centre.lon, "booth lookup failed, simulating");
                Sourced::fallback(self.simulate(centre), e.to_string())
            }
        }
    }

    /// 4 to 6 booths at random offsets around `centre`.
    fn simulate(&self, centre: GeoPoint) -> Vec<Booth> {
        let mut rng = rand::thread_rng();
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let count = rng.gen_range(4..=6);

        (0..count)
            .map(|i| {
                let name = self
                    .catalog
                    .booth_names
                    .choose(&mut rng)
                    .map(String::as_str)
                    .unwrap_or(UNNAMED_BOOTH)
                    .to_string();
                let roll: f64 = rng.gen_range(0.0..1.0);
                let wait = if roll > 0.6 {
                    WaitLevel::High
                } else if roll > 0.3 {
                    WaitLevel::Medium
                } else {
                    WaitLevel::Low
                };
                Booth {
                    id: format!("sim-{}-{}", stamp, i),
                    lat: centre.lat + rng.gen_range(-SIMULATION_SPREAD_DEG..SIMULATION_SPREAD_DEG),
                    lng: centre.lon + rng.gen_range(-SIMULATION_SPREAD_DEG..SIMULATION_SPREAD_DEG),
                    name,
                    kind: SIMULATED_BOOTH.to_string(),
                    wait,
                }
            })
            .collect()
    }
}

fn official_booths(places: Vec<OsmPlace>) -> Vec<Booth> {
    places
        .into_iter()
        .enumerate()
        .map(|(index, place)| Booth {
            id: place.id.to_string(),
            lat: place.lat,
            lng: place.lon,
            name: place
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| UNNAMED_BOOTH.to_string()),
            kind: OFFICIAL_BOOTH.to_string(),
            wait: if index % 3 == 0 {
                WaitLevel::High
            } else {
                WaitLevel::Low
            },
        })
        .collect()
}
