// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Prompts, validation and valuation live in the domain layer.
//
// Naming convention: Base* for trait names (e.g., BaseMarketSearch, BaseEmailService)

use async_trait::async_trait;
use thiserror::Error;

// =============================================================================
// Upstream failure (shared by every collaborator)
// =============================================================================

/// A collaborator call that did not succeed. Calls are made once; there is no retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{service} request failed (status {status:?}): {body}")]
pub struct UpstreamError {
    /// Which collaborator failed ("market search", "email", ...)
    pub service: &'static str,
    /// HTTP status if a response was received
    pub status: Option<u16>,
    /// Upstream response body, or the transport error message
    pub body: String,
}

impl UpstreamError {
    pub fn new(service: &'static str, status: Option<u16>, body: impl Into<String>) -> Self {
        Self {
            service,
            status,
            body: body.into(),
        }
    }
}

// =============================================================================
// Market Search Trait (search-grounded LLM)
// =============================================================================

/// Free text returned by the search model plus the URLs it cited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketResearch {
    pub content: String,
    pub citations: Vec<String>,
}

#[async_trait]
pub trait BaseMarketSearch: Send + Sync {
    async fn research(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<MarketResearch, UpstreamError>;
}

// =============================================================================
// Extraction Trait (JSON-mode LLM)
// =============================================================================

#[async_trait]
pub trait BaseExtractor: Send + Sync {
    /// Returns the model's raw reply. It should be JSON but may be wrapped in
    /// code fences; parsing is the caller's job.
    async fn extract_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, UpstreamError>;
}

// =============================================================================
// Email Trait
// =============================================================================

#[async_trait]
pub trait BaseEmailService: Send + Sync {
    /// Send one HTML email, returning the provider's message id.
    async fn send_email(&self, to: &str, subject: &str, html: &str)
        -> Result<String, UpstreamError>;
}

// =============================================================================
// Object Storage Trait
// =============================================================================

#[async_trait]
pub trait BaseObjectStorage: Send + Sync {
    /// Store `bytes` under `object_name`, returning a public URL.
    async fn upload(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UpstreamError>;
}

// =============================================================================
// Auth Trait (passwordless sign-in)
// =============================================================================

#[async_trait]
pub trait BaseAuthService: Send + Sync {
    async fn send_magic_link(&self, email: &str, redirect_to: &str) -> Result<(), UpstreamError>;
}

// =============================================================================
// Valuation Store Trait (single insert per analysis)
// =============================================================================

#[async_trait]
pub trait BaseValuationStore: Send + Sync {
    async fn insert_valuation(&self, record: &serde_json::Value) -> Result<(), UpstreamError>;
}
