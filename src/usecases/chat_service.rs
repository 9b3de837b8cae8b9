//! Chat proxy. One user utterance in, one reply out; failures become diagnostics.

use crate::domain::fallback::DIAGNOSTIC_PREFIX;
use crate::domain::{ChatTurn, DomainError, FallbackCatalog, Sourced};
use crate::ports::LlmPort;
use std::sync::Arc;
use tracing::{error, info};

pub const CHAT_TEMPERATURE: f32 = 0.7;

pub struct ChatService {
    llm: Arc<dyn LlmPort>,
    persona: String,
    catalog: Arc<FallbackCatalog>,
}

impl ChatService {
    pub fn new(llm: Arc<dyn LlmPort>, persona: String, catalog: Arc<FallbackCatalog>) -> Self {
        Self {
            llm,
            persona,
            catalog,
        }
    }

    /// Ask the assistant. Never fails: upstream errors are folded into the reply text.
    pub async fn reply(&self, message: &str) -> Sourced<String> {
        info!(message_len = message.len(), "chat request");
        let turns = [ChatTurn::system(&self.persona), ChatTurn::user(message)];

        match self.llm.complete(&turns, CHAT_TEMPERATURE).await {
            Ok(text) if !text.trim().is_empty() => Sourced::live(text),
            Ok(_) => self.diagnostic(DomainError::Llm("empty completion".to_string())),
            Err(e) => self.diagnostic(e),
        }
    }

    /// Reply for a request body that could not be read.
    pub fn apology(&self) -> Sourced<String> {
        Sourced::fallback(
            self.catalog.apology_reply.clone(),
            "unreadable chat request body",
        )
    }

    fn diagnostic(&self, err: DomainError) -> Sourced<String> {
        error!(error = %err, "chat completion failed");
        let text = err.to_string();
        Sourced::fallback(format!("{} {}", DIAGNOSTIC_PREFIX, text), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::llm::MockLlmAdapter;
    use crate::domain::fallback::APOLOGY_REPLY;
    use crate::domain::{DataSource, Prompts, Role};

    fn service(llm: Arc<MockLlmAdapter>) -> ChatService {
        ChatService::new(
            llm,
            Prompts::default().chat_persona,
            Arc::new(FallbackCatalog::default()),
        )
    }

    #[tokio::test]
    async fn test_reply_sends_persona_then_message() {
        let llm = Arc::new(MockLlmAdapter::replying("Hello! How can I help?"));
        let out = service(llm.clone()).reply("hi").await;

        assert_eq!(out.source, DataSource::Live);
        assert_eq!(out.data, "Hello! How can I help?");

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][0].role, Role::System);
        assert!(calls[0][0].content.contains("VoteBot"));
        assert_eq!(calls[0][1], ChatTurn::user("hi"));
    }

    #[tokio::test]
    async fn test_upstream_failure_becomes_diagnostic() {
        let llm = Arc::new(MockLlmAdapter::failing("API error 401 Unauthorized: invalid key"));
        let out = service(llm).reply("hi").await;

        assert_eq!(out.source, DataSource::Fallback);
        assert!(out.data.starts_with("SYSTEM DIAGNOSTIC:"));
        assert!(out.data.contains("invalid key"));
        assert!(out.diagnostic.unwrap().contains("invalid key"));
    }

    #[tokio::test]
    async fn test_blank_completion_is_a_failure() {
        let llm = Arc::new(MockLlmAdapter::replying("   "));
        let out = service(llm).reply("hi").await;

        assert!(!out.is_live());
        assert!(out.data.contains("empty completion"));
    }

    #[test]
    fn test_apology_is_verbatim() {
        let out = service(Arc::new(MockLlmAdapter::new())).apology();
        assert_eq!(out.data, APOLOGY_REPLY);
        assert_eq!(out.source, DataSource::Fallback);
    }
}
