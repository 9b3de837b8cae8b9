//! Application use cases. One service per portal endpoint, orchestrating ports.
//!
//! Each service resolves to either live data or a fallback payload; only the
//! news service can fail, and only for a missing credential.

pub mod booth_service;
pub mod chat_service;
pub mod news_service;
pub mod place_service;
pub mod updates_service;

pub use booth_service::BoothService;
pub use chat_service::ChatService;
pub use news_service::NewsService;
pub use place_service::PlaceService;
pub use updates_service::UpdatesService;
