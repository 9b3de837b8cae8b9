//! OpenAI-compatible chat completion adapter.
//!
//! Works against Groq (the default), OpenAI, or any endpoint speaking the
//! `/chat/completions` schema. Implements `LlmPort`.

use crate::domain::{ChatTurn, DomainError, Role};
use crate::ports::LlmPort;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// OpenAI-compatible LLM adapter.
///
/// The API key is sent as a bearer token. An empty key is not rejected here;
/// the upstream answers 401 and callers fall back.
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAdapter {
    /// Create a new adapter.
    ///
    /// # Arguments
    /// * `api_url` - Full completions endpoint (e.g. "https://api.groq.com/openai/v1/chat/completions")
    /// * `api_key` - Bearer token
    /// * `model` - Model identifier (e.g. "llama-3.3-70b-versatile")
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            model,
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct CompletionMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait::async_trait]
impl LlmPort for OpenAiAdapter {
    async fn complete(&self, turns: &[ChatTurn], temperature: f32) -> Result<String, DomainError> {
        debug!(
            model = %self.model,
            turns = turns.len(),
            "sending completion request"
        );

        let request = CompletionRequest {
            model: &self.model,
            messages: turns
                .iter()
                .map(|t| CompletionMessage {
                    role: t.role,
                    content: &t.content,
                })
                .collect(),
            temperature,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Llm(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "LLM API returned error");
            return Err(DomainError::Llm(format!("API error {}: {}", status, text)));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Llm(format!("Failed to parse API response: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DomainError::Llm("No response choices returned".to_string()))?;

        debug!(content_len = content.len(), "received completion");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn adapter(server: &MockServer) -> OpenAiAdapter {
        OpenAiAdapter::new(
            server.url("/openai/v1/chat/completions"),
            "test-key".to_string(),
            "llama-3.3-70b-versatile".to_string(),
        )
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/openai/v1/chat/completions")
                .header("authorization", "Bearer test-key")
                .body_contains(r#""model":"llama-3.3-70b-versatile""#)
                .body_contains(r#""role":"system""#)
                .body_contains(r#""content":"hi""#);
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": "Namaste! How can I help?"}}]
            }));
        });

        let turns = [ChatTurn::system("persona"), ChatTurn::user("hi")];
        let reply = adapter(&server).complete(&turns, 0.7).await.unwrap();

        mock.assert();
        assert_eq!(reply, "Namaste! How can I help?");
    }

    #[tokio::test]
    async fn test_complete_surfaces_status_and_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/openai/v1/chat/completions");
            then.status(401).body("invalid key");
        });

        let err = adapter(&server)
            .complete(&[ChatTurn::user("hi")], 0.7)
            .await
            .unwrap_err();

        let text = err.to_string();
        assert!(text.contains("401"));
        assert!(text.contains("invalid key"));
    }

    #[tokio::test]
    async fn test_complete_keeps_whole_error_body() {
        let body = format!("{}rate limit reached", "x".repeat(300));
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/openai/v1/chat/completions");
            then.status(429).body(body.as_str());
        });

        let err = adapter(&server)
            .complete(&[ChatTurn::user("hi")], 0.7)
            .await
            .unwrap_err();

        assert!(err.to_string().ends_with(&body));
    }

    #[tokio::test]
    async fn test_complete_without_choices_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/openai/v1/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        });

        let err = adapter(&server)
            .complete(&[ChatTurn::user("hi")], 0.7)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No response choices"));
    }
}
