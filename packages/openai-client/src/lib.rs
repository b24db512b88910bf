//! OpenAI-compatible chat completion client
//!
//! A small client for any provider that speaks the OpenAI chat completions
//! wire format. The valuation service uses it twice: against Perplexity for
//! search-grounded market research (which adds `citations` to the response)
//! and against OpenAI in JSON mode for structured extraction.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{OpenAIClient, ChatRequest, Message};
//!
//! let client = OpenAIClient::perplexity(api_key);
//!
//! let response = client.chat_completion(
//!     ChatRequest::new("sonar-pro")
//!         .message(Message::user("Apartamentos en venta en Laureles, Medellín")),
//! ).await?;
//!
//! println!("{} ({} citations)", response.content, response.citations.len());
//! ```

pub mod error;
pub mod types;

pub use error::{OpenAIError, Result};
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";

/// LLM calls routinely take tens of seconds; anything past this is a hung socket.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// OpenAI-compatible API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new client against the OpenAI API.
    pub fn new(api_key: impl Into<String>) -> Self {
        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http_client,
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    /// Create a client against the Perplexity API.
    pub fn perplexity(api_key: impl Into<String>) -> Self {
        Self::new(api_key).with_base_url(PERPLEXITY_BASE_URL)
    }

    /// Set a custom base URL (for other OpenAI-compatible providers, proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Chat completion.
    ///
    /// Sends one request, no retries. A non-2xx status is returned as
    /// [`OpenAIError::Api`] carrying the status and the raw response body.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, base_url = %self.base_url, "Chat completion request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(
                status = %status,
                base_url = %self.base_url,
                error = %truncate_to_char_boundary(&error_text, 500),
                "Chat completion API error"
            );
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            content_length = content.len(),
            citations = chat_response.citations.len(),
            "Chat completion"
        );

        Ok(ChatResponse {
            content,
            citations: chat_response.citations,
            usage: chat_response.usage,
        })
    }
}
