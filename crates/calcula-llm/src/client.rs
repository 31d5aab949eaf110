//! OpenAI chat completions client.
//!
//! Requests and responses use the async-openai wire types; the HTTP exchange
//! goes through reqwest directly so the status line of a failed call is kept
//! in the error text.

use std::time::{Duration, Instant};

use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
};
use async_trait::async_trait;
use calcula_core::CompletionError;
use reqwest::Client;
use tracing::{debug, info};

use crate::CompletionClient;

/// Token usage and timing metrics from a completion call.
#[derive(Debug, Clone, Default)]
pub struct LlmMetrics {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub elapsed_ms: u64,
}

/// Complete response from a completion call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub metrics: LlmMetrics,
}

fn invalid(e: impl ToString) -> CompletionError {
    CompletionError::InvalidRequest(e.to_string())
}

/// Transport failures are reported without the request URL, so a host or
/// port in `OPENAI_BASE_URL` never reaches failure classification.
fn transport(e: reqwest::Error) -> CompletionError {
    CompletionError::Transport(e.without_url().to_string())
}

/// Builds a zero-temperature request carrying one system and one user message.
fn build_request(
    model: &str,
    instruction: &str,
    question: &str,
) -> Result<CreateChatCompletionRequest, CompletionError> {
    let system = ChatCompletionRequestSystemMessageArgs::default()
        .content(instruction)
        .build()
        .map_err(invalid)?;
    let user = ChatCompletionRequestUserMessageArgs::default()
        .content(question)
        .build()
        .map_err(invalid)?;

    CreateChatCompletionRequestArgs::default()
        .model(model)
        .messages([
            ChatCompletionRequestMessage::System(system),
            ChatCompletionRequestMessage::User(user),
        ])
        .temperature(0.0_f32)
        .build()
        .map_err(invalid)
}

/// Takes the text of the first choice; usage is optional in the wire format.
fn first_choice(
    response: CreateChatCompletionResponse,
    elapsed_ms: u64,
) -> Result<LlmResponse, CompletionError> {
    let metrics = LlmMetrics {
        input_tokens: response.usage.as_ref().map_or(0, |u| u.prompt_tokens),
        output_tokens: response.usage.as_ref().map_or(0, |u| u.completion_tokens),
        elapsed_ms,
    };

    let Some(content) = response.choices.into_iter().next().and_then(|c| c.message.content)
    else {
        return Err(CompletionError::EmptyResponse);
    };

    info!(
        elapsed_ms = metrics.elapsed_ms,
        prompt_tokens = metrics.input_tokens,
        completion_tokens = metrics.output_tokens,
        "completion received"
    );

    Ok(LlmResponse { content, metrics })
}

/// Client for the OpenAI chat completions endpoint.
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    /// Creates a client whose calls are bounded by `timeout`.
    pub fn new(
        model: &str,
        api_base: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;

        info!(
            "OpenAiClient: model={}, timeout={}s, api_key_set={}",
            model,
            timeout.as_secs(),
            api_key.is_some()
        );

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            model: model.to_string(),
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_input: &str,
    ) -> Result<LlmResponse, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or(CompletionError::MissingApiKey)?;
        let start = Instant::now();
        let request = build_request(&self.model, system_prompt, user_input)?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(CompletionError::Upstream(format!(
                "OpenAI API error {}: {}",
                status, body
            )));
        }

        debug!("Completion body: {}", body);

        let parsed: CreateChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::Transport(format!("invalid response body: {}", e)))?;

        first_choice(parsed, start.elapsed().as_millis() as u64)
    }
}
