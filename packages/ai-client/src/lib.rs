//! Provider-agnostic chat completion client
//!
//! A minimal client for OpenAI-compatible `/chat/completions` endpoints
//! (OpenAI, OpenRouter, NVIDIA NIM). No domain logic lives here.
//!
//! # Example
//!
//! ```rust,ignore
//! use ai_client::ChatClient;
//!
//! let client = ChatClient::from_env()?
//!     .with_model("nvidia/nemotron-nano-12b-v2-vl");
//!
//! let text = client
//!     .chat_with_system("You are a logistics planner", "Explain this route", 0.6)
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{AiError, Result};
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

/// OpenRouter is the default provider.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model for every completion made through this client.
pub const DEFAULT_MODEL: &str = "nvidia/nemotron-nano-12b-v2-vl";

/// Upper bound for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_MAX_TOKENS: u32 = 800;

const NO_CONTENT: &str = "response contained no message content";

/// Chat completion client for OpenAI-compatible APIs.
#[derive(Clone)]
pub struct ChatClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl ChatClient {
    /// Create a new client with the given API key, pointed at OpenRouter.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: OPENROUTER_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from `OPENROUTER_API_KEY`, falling back to `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| AiError::Config("OPENROUTER_API_KEY not set".into()))?;
        if api_key.trim().is_empty() {
            return Err(AiError::Config("OPENROUTER_API_KEY is empty".into()));
        }
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (OpenAI, NVIDIA, proxies, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the model used by [`ChatClient::chat_with_system`].
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Chat completion.
    ///
    /// Single attempt. Network failures, timeouts, non-2xx statuses and
    /// malformed bodies all surface as [`AiError`].
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, model = %request.model, "Chat completion request failed");
                if e.is_timeout() {
                    AiError::Timeout(self.timeout.as_secs())
                } else {
                    AiError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Chat completion API error");
            return Err(AiError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: types::CompletionBody = response
            .json()
            .await
            .map_err(|e| AiError::Parse(e.to_string()))?;
        let usage = body.usage;
        let content = body
            .into_text()
            .ok_or_else(|| AiError::Parse(NO_CONTENT.into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "Chat completion"
        );

        Ok(ChatResponse { content, usage })
    }

    /// System + user prompt convenience call.
    ///
    /// Retries once when the first failure is retryable.
    pub async fn chat_with_system(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String> {
        let request = ChatRequest::with_prompts(self.model.clone(), system_prompt, user_prompt)
            .with_temperature(temperature)
            .with_max_tokens(DEFAULT_MAX_TOKENS);

        match self.chat_completion(request.clone()).await {
            Ok(response) => Ok(response.content),
            Err(e) if e.is_retryable() => {
                debug!(error = %e, "Retrying chat completion once");
                self.chat_completion(request).await.map(|r| r.content)
            }
            Err(e) => Err(e),
        }
    }
}
