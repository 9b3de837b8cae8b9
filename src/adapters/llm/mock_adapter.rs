//! Mock LLM adapter for offline runs and tests.
//!
//! Replays scripted replies in order, then repeats the last one.

use crate::domain::{ChatTurn, DomainError};
use crate::ports::LlmPort;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// Scripted outcome of one completion call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Fail(String),
}

/// Mock LLM adapter.
///
/// Returns predetermined replies without making API calls and records every
/// conversation it receives.
pub struct MockLlmAdapter {
    script: Vec<MockReply>,
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    calls: Mutex<Vec<Vec<ChatTurn>>>,
}

impl MockLlmAdapter {
    /// Offline default: a canned chat reply.
    pub fn new() -> Self {
        Self::scripted(vec![MockReply::Text(
            "[MOCK] VoteBot is running offline. Check your voter status on the Status page."
                .to_string(),
        )])
    }

    pub fn scripted(script: Vec<MockReply>) -> Self {
        Self {
            script,
            delay_ms: 0,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::scripted(vec![MockReply::Text(text.into())])
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::scripted(vec![MockReply::Fail(reason.into())])
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Conversations received so far.
    pub fn calls(&self) -> Vec<Vec<ChatTurn>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for MockLlmAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmPort for MockLlmAdapter {
    async fn complete(&self, turns: &[ChatTurn], _temperature: f32) -> Result<String, DomainError> {
        info!(turns = turns.len(), "[MOCK] Simulating completion");

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        let index = match self.calls.lock() {
            Ok(mut calls) => {
                calls.push(turns.to_vec());
                calls.len() - 1
            }
            Err(_) => 0,
        };

        match self.script.get(index).or_else(|| self.script.last()) {
            Some(MockReply::Text(text)) => Ok(text.clone()),
            Some(MockReply::Fail(reason)) => Err(DomainError::Llm(reason.clone())),
            None => Err(DomainError::Llm("[MOCK] empty script".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_script_then_repeats_last() {
        let mock = MockLlmAdapter::scripted(vec![
            MockReply::Fail("boom".into()),
            MockReply::Text("ok".into()),
        ])
        .with_delay(1);

        assert!(mock.complete(&[ChatTurn::user("a")], 0.7).await.is_err());
        assert_eq!(mock.complete(&[ChatTurn::user("b")], 0.7).await.unwrap(), "ok");
        assert_eq!(mock.complete(&[ChatTurn::user("c")], 0.7).await.unwrap(), "ok");

        let calls = mock.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1][0].content, "b");
    }
}
