//! Server dependencies for handlers (using traits for testability)
//!
//! This module provides the dependency container every route receives. All
//! external services sit behind `Base*` traits so tests can swap in mocks.
//! A collaborator left out of the environment is `None`; the action that
//! needs it reports a configuration error at request time.

use async_trait::async_trait;
use openai_client::OpenAIClient;
use resend_client::{ResendClient, ResendError};
use std::sync::Arc;
use supabase_client::{SupabaseClient, SupabaseError, SupabaseOptions};

use crate::config::Config;
use crate::domains::valuation::ValuationSettings;
use crate::kernel::llm::{OpenAIExtractor, PerplexitySearch};
use crate::kernel::{
    BaseAuthService, BaseEmailService, BaseExtractor, BaseMarketSearch, BaseObjectStorage,
    BaseValuationStore, UpstreamError,
};

// =============================================================================
// Resend Adapter (implements BaseEmailService)
// =============================================================================

pub struct ResendAdapter(pub ResendClient);

#[async_trait]
impl BaseEmailService for ResendAdapter {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<String, UpstreamError> {
        self.0
            .send_email(to, subject, html)
            .await
            .map(|sent| sent.id)
            .map_err(|e| match e {
                ResendError::Api { status, message } => {
                    UpstreamError::new("email", Some(status), message)
                }
                other => UpstreamError::new("email", None, other.to_string()),
            })
    }
}

// =============================================================================
// Supabase Adapter (storage, auth and valuation store)
// =============================================================================

pub struct SupabaseAdapter {
    client: SupabaseClient,
    bucket: String,
    valuations_table: String,
}

impl SupabaseAdapter {
    pub fn new(client: SupabaseClient, bucket: String, valuations_table: String) -> Self {
        Self {
            client,
            bucket,
            valuations_table,
        }
    }
}

fn supabase_upstream(service: &'static str, error: SupabaseError) -> UpstreamError {
    match error {
        SupabaseError::Api { status, message } => UpstreamError::new(service, Some(status), message),
        other => UpstreamError::new(service, None, other.to_string()),
    }
}

#[async_trait]
impl BaseObjectStorage for SupabaseAdapter {
    async fn upload(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UpstreamError> {
        self.client
            .upload_object(&self.bucket, object_name, content_type, bytes)
            .await
            .map_err(|e| supabase_upstream("storage", e))
    }
}

#[async_trait]
impl BaseAuthService for SupabaseAdapter {
    async fn send_magic_link(&self, email: &str, redirect_to: &str) -> Result<(), UpstreamError> {
        self.client
            .send_magic_link(email, redirect_to)
            .await
            .map_err(|e| supabase_upstream("auth", e))
    }
}

#[async_trait]
impl BaseValuationStore for SupabaseAdapter {
    async fn insert_valuation(&self, record: &serde_json::Value) -> Result<(), UpstreamError> {
        self.client
            .insert_row(&self.valuations_table, record)
            .await
            .map_err(|e| supabase_upstream("valuation store", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to routes (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub market_search: Option<Arc<dyn BaseMarketSearch>>,
    pub extractor: Option<Arc<dyn BaseExtractor>>,
    pub email: Option<Arc<dyn BaseEmailService>>,
    pub storage: Option<Arc<dyn BaseObjectStorage>>,
    pub auth: Option<Arc<dyn BaseAuthService>>,
    pub valuation_store: Option<Arc<dyn BaseValuationStore>>,
    pub valuation_settings: ValuationSettings,
    /// Where the magic link sends the user after sign-in
    pub magic_link_redirect: String,
}

impl ServerDeps {
    /// Build production dependencies from configuration.
    pub fn from_config(config: &Config) -> Self {
        let market_search = config.perplexity_api_key.as_ref().map(|key| {
            Arc::new(PerplexitySearch::new(
                OpenAIClient::perplexity(key.clone()),
                config.search_model.clone(),
            )) as Arc<dyn BaseMarketSearch>
        });

        let extractor = config.openai_api_key.as_ref().map(|key| {
            Arc::new(OpenAIExtractor::new(
                OpenAIClient::new(key.clone()),
                config.extraction_model.clone(),
            )) as Arc<dyn BaseExtractor>
        });

        let email = config.resend_api_key.as_ref().map(|key| {
            Arc::new(ResendAdapter(ResendClient::new(
                key.clone(),
                config.email_from.clone(),
            ))) as Arc<dyn BaseEmailService>
        });

        let supabase = config.supabase_credentials().map(|(url, key)| {
            Arc::new(SupabaseAdapter::new(
                SupabaseClient::new(SupabaseOptions {
                    url,
                    service_role_key: key,
                }),
                config.storage_bucket.clone(),
                config.valuations_table.clone(),
            ))
        });

        Self {
            market_search,
            extractor,
            email,
            storage: supabase
                .clone()
                .map(|s| s as Arc<dyn BaseObjectStorage>),
            auth: supabase.clone().map(|s| s as Arc<dyn BaseAuthService>),
            valuation_store: supabase.map(|s| s as Arc<dyn BaseValuationStore>),
            valuation_settings: ValuationSettings::default(),
            magic_link_redirect: config.magic_link_redirect.clone(),
        }
    }

    /// Dependencies with every collaborator unset.
    pub fn unconfigured() -> Self {
        Self {
            market_search: None,
            extractor: None,
            email: None,
            storage: None,
            auth: None,
            valuation_store: None,
            valuation_settings: ValuationSettings::default(),
            magic_link_redirect: String::new(),
        }
    }
}
