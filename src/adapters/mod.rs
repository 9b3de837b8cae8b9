//! Infrastructure adapters. Implement outbound ports and serve the inbound HTTP API.
//!
//! LLM, news search, OpenStreetMap, axum. Map errors to DomainError.

pub mod geo;
pub mod http;
pub mod llm;
pub mod news;
