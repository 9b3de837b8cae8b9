//! Domain entities. Pure data structures for the portal API.
//!
//! No reqwest/axum types here; upstream payloads are mapped into these by adapters.

use serde::{Deserialize, Deserializer, Serialize};

/// Whether a payload came from the upstream service or from the fallback catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
}

impl DataSource {
    pub fn as_str(self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Fallback => "fallback",
        }
    }
}

/// A payload tagged with its origin. Fallback payloads carry the failure that caused them.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub source: DataSource,
    pub diagnostic: Option<String>,
    pub data: T,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self {
            source: DataSource::Live,
            diagnostic: None,
            data,
        }
    }

    pub fn fallback(data: T, diagnostic: impl Into<String>) -> Self {
        Self {
            source: DataSource::Fallback,
            diagnostic: Some(diagnostic.into()),
            data,
        }
    }

    pub fn is_live(&self) -> bool {
        self.source == DataSource::Live
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Reply body for `POST /api/chat`. `reply` is always present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub source: DataSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl From<Sourced<String>> for ChatReply {
    fn from(value: Sourced<String>) -> Self {
        Self {
            reply: value.data,
            source: value.source,
            diagnostic: value.diagnostic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One turn of a completion conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AI updates
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateCategory {
    #[serde(alias = "upcoming")]
    Upcoming,
    #[serde(alias = "result", alias = "Result declared", alias = "Result Declared")]
    Result,
    #[serde(alias = "news")]
    News,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "high")]
    High,
    #[serde(alias = "normal")]
    Normal,
}

/// A short election update shown in the sidebar feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateItem {
    /// Models sometimes emit numeric ids; both forms are accepted.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub category: UpdateCategory,
    pub status: String,
    pub priority: Priority,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// News
// ─────────────────────────────────────────────────────────────────────────────

/// News headline as served to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub desc: String,
    pub date: String,
    pub source: String,
    pub url: String,
}

/// Article as returned by the news-search provider, before filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub source_name: Option<String>,
    pub url: Option<String>,
}

/// Keyword search sent to the news provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub q: String,
    pub search_in: String,
    pub language: String,
    pub sort_by: String,
    pub page_size: u8,
}

impl NewsQuery {
    /// Election coverage for India, matched against title and description only.
    pub fn election_india() -> Self {
        Self {
            q: r#"(Election OR "Voter ID" OR "ECI" OR "Polls" OR "Assembly" OR "Voting") AND India"#
                .to_string(),
            search_in: "title,description".to_string(),
            language: "en".to_string(),
            sort_by: "publishedAt".to_string(),
            page_size: 6,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Polling booths & places
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// New Delhi; used when the caller gives no usable coordinates.
    pub const DEFAULT_CENTRE: GeoPoint = GeoPoint {
        lat: 28.6139,
        lon: 77.2090,
    };

    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Candidate place returned by the OpenStreetMap locator.
#[derive(Debug, Clone, PartialEq)]
pub struct OsmPlace {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaitLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booth {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub wait: WaitLevel,
}

/// Geocoder autosuggest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
}
