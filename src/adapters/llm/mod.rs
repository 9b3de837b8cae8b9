//! LLM adapter module. Implements LlmPort.
//!
//! Provides the OpenAI-compatible adapter and a mock adapter for offline runs and tests.

pub mod mock_adapter;
pub mod openai_adapter;

pub use mock_adapter::{MockLlmAdapter, MockReply};
pub use openai_adapter::OpenAiAdapter;
