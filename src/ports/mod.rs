//! Port traits. API boundaries for the hexagon.
//!
//! - Outbound: Called by use cases into upstream services (LLM, news, OpenStreetMap)
//!
//! The inbound side is the axum router in `adapters::http`.

pub mod outbound;

pub use outbound::{BoothLocatorPort, GeocoderPort, LlmPort, NewsSearchPort};
