//! Concept Forge LLM
//!
//! The generative collaborator used by the requirements analyzer and the
//! content generator, behind a unified interface:
//! - Anthropic Claude (messages API)
//! - OpenAI and OpenAI-compatible endpoints (DeepSeek, Ollama)
//!
//! Also includes the HTTP client factory and a provider factory that maps a
//! `ProviderConfig` to a concrete implementation.

pub mod anthropic;
pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use anthropic::AnthropicProvider;
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use provider::{create_provider, LlmProvider};
pub use types::*;
