//! Application configuration. Bind address, upstream endpoints, API credentials.

use crate::adapters::geo::{NOMINATIM_SEARCH_URL, OVERPASS_INTERPRETER_URL};
use crate::adapters::news::{DEFAULT_REVALIDATE_SECS, NEWSAPI_EVERYTHING_URL};
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LLM_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_RESULTS_CUTOFF_YEAR: i32 = 2026;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Bind host. Read from PORTAL_HOST.
    #[serde(default)]
    pub host: Option<String>,

    /// Bind port. Read from PORTAL_PORT.
    #[serde(default)]
    pub port: Option<u16>,

    // ─────────────────────────────────────────────────────────────────────────
    // LLM Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// LLM API key. Read from PORTAL_LLM_API_KEY or GROQ_API_KEY.
    #[serde(default)]
    pub llm_api_key: Option<String>,

    /// Chat completions endpoint. Defaults to Groq. Read from PORTAL_LLM_API_URL.
    #[serde(default)]
    pub llm_api_url: Option<String>,

    /// Model identifier. Defaults to "llama-3.3-70b-versatile". Read from PORTAL_LLM_MODEL.
    #[serde(default)]
    pub llm_model: Option<String>,

    /// Serve canned LLM replies instead of calling upstream. Read from PORTAL_LLM_MOCK.
    #[serde(default)]
    pub llm_mock: Option<bool>,

    /// Year before which the updates prompt forbids declared results. Read from PORTAL_RESULTS_CUTOFF_YEAR.
    #[serde(default)]
    pub results_cutoff_year: Option<i32>,

    // ─────────────────────────────────────────────────────────────────────────
    // News Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// News search API key. Read from PORTAL_NEWS_API_KEY or NEWS_API_KEY.
    #[serde(default)]
    pub news_api_key: Option<String>,

    /// News search endpoint. Read from PORTAL_NEWS_API_URL.
    #[serde(default)]
    pub news_api_url: Option<String>,

    /// Seconds a news search result may be reused (default 3600). Read from PORTAL_NEWS_REVALIDATE_SECS.
    #[serde(default)]
    pub news_revalidate_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Map Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Overpass interpreter endpoint. Read from PORTAL_OVERPASS_URL.
    #[serde(default)]
    pub overpass_url: Option<String>,

    /// Nominatim search endpoint. Read from PORTAL_NOMINATIM_URL.
    #[serde(default)]
    pub nominatim_url: Option<String>,

    /// User-Agent sent to news and OpenStreetMap services. Read from PORTAL_USER_AGENT.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Optional JSON file overriding the built-in fallback payloads. Read from PORTAL_FALLBACK_PATH.
    #[serde(default)]
    pub fallback_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("PORTAL").try_parsing(true));
        if let Ok(path) = std::env::var("PORTAL_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the bind address as "host:port".
    pub fn bind_addr(&self) -> String {
        format!(
            "{}:{}",
            self.host.as_deref().unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT)
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // LLM Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the LLM API key if configured. Reads from config or GROQ_API_KEY env.
    pub fn llm_api_key(&self) -> Option<String> {
        non_empty(
            self.llm_api_key
                .clone()
                .or_else(|| std::env::var("GROQ_API_KEY").ok()),
        )
    }

    pub fn llm_api_url_or_default(&self) -> String {
        self.llm_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_LLM_API_URL.to_string())
    }

    pub fn llm_model_or_default(&self) -> String {
        self.llm_model
            .clone()
            .unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string())
    }

    pub fn is_llm_mocked(&self) -> bool {
        self.llm_mock.unwrap_or(false)
    }

    pub fn results_cutoff_year_or_default(&self) -> i32 {
        self.results_cutoff_year
            .unwrap_or(DEFAULT_RESULTS_CUTOFF_YEAR)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // News Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the news search key from config or NEWS_API_KEY env. Empty counts as unset.
    pub fn news_api_key(&self) -> Option<String> {
        non_empty(
            self.news_api_key
                .clone()
                .or_else(|| std::env::var("NEWS_API_KEY").ok()),
        )
    }

    pub fn news_api_url_or_default(&self) -> String {
        self.news_api_url
            .clone()
            .unwrap_or_else(|| NEWSAPI_EVERYTHING_URL.to_string())
    }

    pub fn news_revalidate_secs_or_default(&self) -> u64 {
        self.news_revalidate_secs.unwrap_or(DEFAULT_REVALIDATE_SECS)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Map Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn overpass_url_or_default(&self) -> String {
        self.overpass_url
            .clone()
            .unwrap_or_else(|| OVERPASS_INTERPRETER_URL.to_string())
    }

    pub fn nominatim_url_or_default(&self) -> String {
        self.nominatim_url
            .clone()
            .unwrap_or_else(|| NOMINATIM_SEARCH_URL.to_string())
    }

    pub fn user_agent_or_default(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("votebot-gateway/{}", env!("CARGO_PKG_VERSION")))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
