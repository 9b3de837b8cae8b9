//! Inbound HTTP adapter. Maps portal endpoints onto use cases.
//!
//! Every list endpoint answers 200 with a well-formed body and tags its origin in
//! the `x-data-source` header. `/api/news` is the only route that can answer 500,
//! and only for a missing credential.

use super::state::AppState;
use crate::domain::{ChatReply, ChatRequest, DomainError, GeoPoint, Sourced};
use anyhow::Context;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

pub const DATA_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-data-source");

/// Build the router with all portal routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/gemini-updates", get(updates_handler))
        .route("/api/news", get(news_handler))
        .route("/api/booths", get(booths_handler))
        .route("/api/places", get(places_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
        .with_state(Arc::new(state))
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("invalid bind address {}", addr))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    info!(%addr, "portal API listening");

    axum::serve(listener, router(state))
        .await
        .context("server error")
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

fn sourced_json<T: Serialize>(sourced: Sourced<T>) -> Response {
    ([(DATA_SOURCE_HEADER, sourced.source.as_str())], Json(sourced.data)).into_response()
}

// ============================================================================
// HANDLERS
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /api/chat. Always 200; unreadable bodies get the apology reply.
///
/// The body is parsed as JSON whatever its Content-Type.
async fn chat_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let payload = body
        .map_err(|e| e.to_string())
        .and_then(|bytes| serde_json::from_slice::<ChatRequest>(&bytes).map_err(|e| e.to_string()));
    let outcome = match payload {
        Ok(req) => state.chat.reply(&req.message).await,
        Err(error) => {
            debug!(%error, "unreadable chat body");
            state.chat.apology()
        }
    };
    let source = outcome.source;
    ([(DATA_SOURCE_HEADER, source.as_str())], Json(ChatReply::from(outcome))).into_response()
}

/// GET /api/gemini-updates. Never cached.
async fn updates_handler(State(state): State<Arc<AppState>>) -> Response {
    let updates = state.updates.latest().await;
    (
        [
            (CACHE_CONTROL, "no-store"),
            (DATA_SOURCE_HEADER, updates.source.as_str()),
        ],
        Json(updates.data),
    )
        .into_response()
}

/// GET /api/news.
async fn news_handler(State(state): State<Arc<AppState>>) -> Result<Response, DomainError> {
    Ok(sourced_json(state.news.headlines().await?))
}

#[derive(Debug, Deserialize)]
struct BoothQuery {
    lat: Option<f64>,
    lon: Option<f64>,
}

/// GET /api/booths?lat=..&lon=.. Missing or invalid coordinates use the default centre.
async fn booths_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<BoothQuery>, QueryRejection>,
) -> Response {
    let centre = match query {
        Ok(Query(BoothQuery {
            lat: Some(lat),
            lon: Some(lon),
        })) => GeoPoint::new(lat, lon),
        Ok(_) => GeoPoint::DEFAULT_CENTRE,
        Err(rejection) => {
            debug!(error = %rejection, "unreadable booth query");
            GeoPoint::DEFAULT_CENTRE
        }
    };
    let centre = if centre.is_valid() {
        centre
    } else {
        GeoPoint::DEFAULT_CENTRE
    };
    sourced_json(state.booths.nearby(centre).await)
}

#[derive(Debug, Deserialize)]
struct PlaceQuery {
    #[serde(default)]
    q: String,
}

/// GET /api/places?q=..
async fn places_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PlaceQuery>, QueryRejection>,
) -> Response {
    let q = query.map(|Query(p)| p.q).unwrap_or_default();
    sourced_json(state.places.suggest(&q).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::Upstreams;
    use crate::domain::{FallbackCatalog, Prompts};
    use crate::shared::config::AppConfig;

    fn state() -> AppState {
        let cfg = AppConfig {
            llm_mock: Some(true),
            ..Default::default()
        };
        AppState::new(
            Upstreams::from_config(&cfg),
            Prompts::default(),
            Arc::new(FallbackCatalog::default()),
        )
    }

    #[tokio::test]
    async fn test_serve_rejects_bad_address() {
        let err = serve("not-an-address", state()).await.unwrap_err();
        assert!(err.to_string().contains("invalid bind address not-an-address"));
    }

    #[tokio::test]
    async fn test_serve_reports_bind_failure() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap().to_string();

        let err = serve(&addr, state()).await.unwrap_err();

        assert_eq!(err.to_string(), format!("bind {}", addr));
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }
}
