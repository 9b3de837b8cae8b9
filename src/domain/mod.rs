//! Core domain layer. No external I/O dependencies.
//!
//! Payload entities, fallback content and errors live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod fallback;

pub use entities::{
    Booth, ChatReply, ChatRequest, ChatTurn, DataSource, GeoPoint, NewsItem, NewsQuery, OsmPlace,
    PlaceSuggestion, Priority, RawArticle, Role, Sourced, UpdateCategory, UpdateItem, WaitLevel,
};
pub use errors::DomainError;
pub use fallback::{FallbackCatalog, Prompts};
