//! Shared handler state and its wiring from configuration.

use crate::adapters::geo::{NominatimAdapter, OverpassAdapter};
use crate::adapters::llm::{MockLlmAdapter, OpenAiAdapter};
use crate::adapters::news::{NewsApiAdapter, RevalidatingNewsSearch};
use crate::domain::{FallbackCatalog, NewsQuery, Prompts};
use crate::ports::{BoothLocatorPort, GeocoderPort, LlmPort, NewsSearchPort};
use crate::shared::config::AppConfig;
use crate::usecases::booth_service::{DEFAULT_BOOTH_LIMIT, DEFAULT_SEARCH_RADIUS_M};
use crate::usecases::{BoothService, ChatService, NewsService, PlaceService, UpdatesService};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// One service per endpoint. Services share nothing mutable with each other.
pub struct AppState {
    pub chat: ChatService,
    pub updates: UpdatesService,
    pub news: NewsService,
    pub booths: BoothService,
    pub places: PlaceService,
}

/// Upstream ports the services are built from. Tests substitute fakes here.
pub struct Upstreams {
    pub llm: Arc<dyn LlmPort>,
    /// `None` when no news-search key is configured.
    pub news: Option<Arc<dyn NewsSearchPort>>,
    pub booths: Arc<dyn BoothLocatorPort>,
    pub geocoder: Arc<dyn GeocoderPort>,
}

impl Upstreams {
    /// Build the real adapters from configuration.
    pub fn from_config(cfg: &AppConfig) -> Self {
        let user_agent = cfg.user_agent_or_default();

        let llm: Arc<dyn LlmPort> = if cfg.is_llm_mocked() {
            warn!("PORTAL_LLM_MOCK set, using mock LLM adapter");
            Arc::new(MockLlmAdapter::new())
        } else {
            if cfg.llm_api_key().is_none() {
                warn!("GROQ_API_KEY not set; LLM endpoints will serve fallbacks");
            }
            info!(
                model = %cfg.llm_model_or_default(),
                url = %cfg.llm_api_url_or_default(),
                "LLM adapter configured"
            );
            Arc::new(OpenAiAdapter::new(
                cfg.llm_api_url_or_default(),
                cfg.llm_api_key().unwrap_or_default(),
                cfg.llm_model_or_default(),
            ))
        };

        let news: Option<Arc<dyn NewsSearchPort>> = match cfg.news_api_key() {
            Some(key) => {
                let revalidate_secs = cfg.news_revalidate_secs_or_default();
                info!(revalidate_secs, "news search enabled");
                let api = Arc::new(NewsApiAdapter::new(
                    cfg.news_api_url_or_default(),
                    key,
                    user_agent.clone(),
                ));
                Some(Arc::new(RevalidatingNewsSearch::new(
                    api,
                    Duration::from_secs(revalidate_secs),
                )))
            }
            None => {
                warn!("NEWS_API_KEY not set; /api/news will answer 500");
                None
            }
        };

        Self {
            llm,
            news,
            booths: Arc::new(OverpassAdapter::new(
                cfg.overpass_url_or_default(),
                user_agent.clone(),
            )),
            geocoder: Arc::new(NominatimAdapter::new(
                cfg.nominatim_url_or_default(),
                user_agent,
            )),
        }
    }
}

impl AppState {
    pub fn new(upstreams: Upstreams, prompts: Prompts, catalog: Arc<FallbackCatalog>) -> Self {
        Self {
            chat: ChatService::new(
                Arc::clone(&upstreams.llm),
                prompts.chat_persona,
                Arc::clone(&catalog),
            ),
            updates: UpdatesService::new(
                upstreams.llm,
                prompts.updates_brief,
                Arc::clone(&catalog),
            ),
            news: NewsService::new(
                upstreams.news,
                NewsQuery::election_india(),
                Arc::clone(&catalog),
            ),
            booths: BoothService::new(
                upstreams.booths,
                catalog,
                DEFAULT_SEARCH_RADIUS_M,
                DEFAULT_BOOTH_LIMIT,
            ),
            places: PlaceService::new(upstreams.geocoder),
        }
    }

    pub fn from_config(cfg: &AppConfig, catalog: Arc<FallbackCatalog>) -> Self {
        Self::new(
            Upstreams::from_config(cfg),
            Prompts::new(cfg.results_cutoff_year_or_default()),
            catalog,
        )
    }
}
