//! Fallback catalog and prompts. Immutable values built once at startup and
//! injected into the use cases, so tests can substitute their own.

use super::entities::{NewsItem, Priority, UpdateCategory, UpdateItem};
use super::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reply for chat requests whose body cannot be parsed.
pub const APOLOGY_REPLY: &str = "I didn't catch that. Could you say it again?";

/// Prefix of chat replies produced from an upstream failure.
pub const DIAGNOSTIC_PREFIX: &str = "SYSTEM DIAGNOSTIC:";

/// Name substituted for booths without an OSM `name` tag.
pub const UNNAMED_BOOTH: &str = "Govt. Polling Station";

/// Payloads served when an upstream call fails or returns nothing usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackCatalog {
    pub apology_reply: String,
    pub updates: Vec<UpdateItem>,
    pub news: Vec<NewsItem>,
    /// Names used for simulated polling booths.
    pub booth_names: Vec<String>,
}

impl Default for FallbackCatalog {
    fn default() -> Self {
        Self {
            apology_reply: APOLOGY_REPLY.to_string(),
            updates: default_updates(),
            news: default_news(),
            booth_names: [
                "Govt. Primary School",
                "St. Xavier's College",
                "Community Centre Hall",
                "Municipal Corporation Office",
                "Public Library",
                "City High School",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl FallbackCatalog {
    /// Load a catalog from a JSON file. Missing fields keep their built-in values.
    pub fn from_json_file(path: &Path) -> Result<Self, DomainError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!("read fallback catalog {}: {}", path.display(), e))
        })?;
        let catalog: Self = serde_json::from_str(&raw).map_err(|e| {
            DomainError::Config(format!("parse fallback catalog {}: {}", path.display(), e))
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Every fallback list must be non-empty, otherwise a degraded page renders blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.updates.is_empty() {
            return Err(DomainError::Config("fallback updates are empty".into()));
        }
        if self.news.is_empty() {
            return Err(DomainError::Config("fallback news is empty".into()));
        }
        if self.booth_names.is_empty() {
            return Err(DomainError::Config("fallback booth names are empty".into()));
        }
        Ok(())
    }
}

fn update(
    id: &str,
    title: &str,
    category: UpdateCategory,
    status: &str,
    priority: Priority,
) -> UpdateItem {
    UpdateItem {
        id: id.to_string(),
        title: title.to_string(),
        category,
        status: status.to_string(),
        priority,
    }
}

fn default_updates() -> Vec<UpdateItem> {
    vec![
        update(
            "backup-1",
            "Maharashtra Civic Results",
            UpdateCategory::Result,
            "BJP-Shinde Sena alliance sweeps BMC & Pune Municipal polls.",
            Priority::High,
        ),
        update(
            "backup-2",
            "Tamil Nadu 2026",
            UpdateCategory::Upcoming,
            "Actor Vijay's TVK party announces first candidate list for Assembly polls.",
            Priority::Normal,
        ),
        update(
            "backup-3",
            "West Bengal Polls",
            UpdateCategory::Upcoming,
            "ECI publishes final electoral roll; 2.4% rise in women voters.",
            Priority::Normal,
        ),
        update(
            "backup-4",
            "National Voters' Day",
            UpdateCategory::News,
            "PM addresses youth on 'My India, My Vote' theme.",
            Priority::Normal,
        ),
        update(
            "backup-5",
            "Kerala Assembly",
            UpdateCategory::Upcoming,
            "LDF launches state-wide 'Vikasana Jatha' campaign.",
            Priority::Normal,
        ),
    ]
}

fn default_news() -> Vec<NewsItem> {
    vec![
        NewsItem {
            id: 101,
            title: "Assembly Elections 2026 Schedule Announced".to_string(),
            desc: "ECI announces dates for Tamil Nadu, Kerala, and West Bengal assembly polls."
                .to_string(),
            date: "Jan 26".to_string(),
            source: "ECI Official".to_string(),
            url: "https://eci.gov.in".to_string(),
        },
        NewsItem {
            id: 102,
            title: "Voter Turnout Increases by 5% in Urban Areas".to_string(),
            desc: "New digital initiatives credited for higher youth participation in recent by-polls."
                .to_string(),
            date: "Jan 25".to_string(),
            source: "Times of India".to_string(),
            url: "#".to_string(),
        },
        NewsItem {
            id: 103,
            title: "New 'Smart Voter' App Launched for Easy Registration".to_string(),
            desc: "Citizens can now update address and download digital voter cards instantly."
                .to_string(),
            date: "Jan 24".to_string(),
            source: "Tech News".to_string(),
            url: "#".to_string(),
        },
    ]
}

/// Prompt texts sent to the LLM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    pub chat_persona: String,
    pub updates_brief: String,
}

impl Prompts {
    /// `results_cutoff_year` is advisory text for the model; nothing verifies it.
    pub fn new(results_cutoff_year: i32) -> Self {
        Self {
            chat_persona: "You are 'VoteBot', a smart and friendly election assistant for India. \
                If the user says 'hi' or 'hello', greet them warmly and ask how you can help. \
                Keep answers short (2-3 sentences max)."
                .to_string(),
            updates_brief: format!(
                "Act as an Indian Election Reporter. Generate exactly 3 realistic updates for recent and upcoming elections in India as of the current month.\n\
                 Constraints:\n\
                 1. DO NOT PROVIDE RESULTS DECLARED BEFORE {year}.\n\
                 2. No general news, only the posts for which elections are or were held.\n\
                 Strictly return a JSON array of objects with keys: id, title, category (Result/Upcoming/News), status, priority (High/Normal).\n\
                 Do NOT use markdown. Just raw JSON.",
                year = results_cutoff_year
            ),
        }
    }
}

impl Default for Prompts {
    fn default() -> Self {
        Self::new(2026)
    }
}
