//! Completion client for the OpenAI chat completions API.
//!
//! - [`CompletionClient`] — Seam used by the server; one system + one user message in, text out
//! - [`OpenAiClient`] — Production implementation over HTTPS
//!
//! ```rust,ignore
//! use calcula_llm::{CompletionClient, OpenAiClient};
//!
//! let client = OpenAiClient::new("gpt-4o-mini", "https://api.openai.com/v1", api_key, timeout)?;
//! let response = client.complete("Return only the result.", "2 + 2").await?;
//! println!("{}", response.content);
//! ```

mod client;

pub use calcula_core::CompletionError;
pub use client::{LlmMetrics, LlmResponse, OpenAiClient};

use async_trait::async_trait;

/// A service that turns a system instruction and a user message into text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Requests a single deterministic completion.
    async fn complete(
        &self,
        system_prompt: &str,
        user_input: &str,
    ) -> Result<LlmResponse, CompletionError>;
}
