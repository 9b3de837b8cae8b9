//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("LLM request failed: {0}")]
    Llm(String),

    #[error("News search failed: {0}")]
    NewsSearch(String),

    #[error("Geo lookup failed: {0}")]
    Geo(String),

    /// A required credential is not configured. Display text is the client-facing error body.
    #[error("{0} missing")]
    MissingCredential(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message() {
        assert_eq!(
            DomainError::MissingCredential("API Key").to_string(),
            "API Key missing"
        );
    }
}
