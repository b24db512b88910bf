// LLM collaborators over the OpenAI-compatible client
//
// Perplexity answers the market research prompt (with citations); OpenAI in
// JSON mode turns that text into records. One attempt each.

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, OpenAIError};

use super::{BaseExtractor, BaseMarketSearch, MarketResearch, UpstreamError};

fn upstream(service: &'static str, error: OpenAIError) -> UpstreamError {
    let status = error.status();
    let body = match error {
        OpenAIError::Api { message, .. } => message,
        other => other.to_string(),
    };
    UpstreamError::new(service, status, body)
}

/// Search-grounded research through Perplexity.
pub struct PerplexitySearch {
    client: OpenAIClient,
    model: String,
}

impl PerplexitySearch {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl BaseMarketSearch for PerplexitySearch {
    async fn research(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<MarketResearch, UpstreamError> {
        tracing::info!(model = %self.model, "Requesting market research");

        let response = self
            .client
            .chat_completion(
                ChatRequest::new(&self.model)
                    .message(Message::system(system_prompt))
                    .message(Message::user(user_prompt))
                    .temperature(0.2)
                    .max_tokens(4000),
            )
            .await
            .map_err(|e| upstream("market search", e))?;

        Ok(MarketResearch {
            content: response.content,
            citations: response.citations,
        })
    }
}

/// Structured extraction through an OpenAI model in JSON mode.
pub struct OpenAIExtractor {
    client: OpenAIClient,
    model: String,
}

impl OpenAIExtractor {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl BaseExtractor for OpenAIExtractor {
    async fn extract_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, UpstreamError> {
        tracing::info!(model = %self.model, "Requesting structured extraction");

        let response = self
            .client
            .chat_completion(
                ChatRequest::new(&self.model)
                    .message(Message::system(system_prompt))
                    .message(Message::user(user_prompt))
                    .temperature(0.0)
                    .json_mode(),
            )
            .await
            .map_err(|e| upstream("extraction", e))?;

        Ok(response.content)
    }
}
