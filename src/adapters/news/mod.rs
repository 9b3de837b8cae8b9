//! News search adapters. Implement NewsSearchPort.

pub mod newsapi_adapter;
pub mod revalidate;

pub use newsapi_adapter::{NEWSAPI_EVERYTHING_URL, NewsApiAdapter};
pub use revalidate::{DEFAULT_REVALIDATE_SECS, RevalidatingNewsSearch};
