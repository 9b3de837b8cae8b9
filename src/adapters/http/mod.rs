//! Inbound HTTP adapter (axum).

pub mod routes;
pub mod state;

pub use routes::{DATA_SOURCE_HEADER, router, serve};
pub use state::{AppState, Upstreams};
