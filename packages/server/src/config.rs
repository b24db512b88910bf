use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables.
///
/// Collaborator credentials are optional at startup. A handler whose
/// collaborator is missing answers with a configuration error instead of the
/// whole server refusing to boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    pub perplexity_api_key: Option<String>,
    pub search_model: String,

    pub openai_api_key: Option<String>,
    pub extraction_model: String,

    pub resend_api_key: Option<String>,
    pub email_from: String,

    pub supabase_url: Option<String>,
    pub supabase_service_role_key: Option<String>,
    pub storage_bucket: String,
    pub valuations_table: String,
    pub magic_link_redirect: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            perplexity_api_key: non_empty("PERPLEXITY_API_KEY"),
            search_model: env::var("SEARCH_MODEL").unwrap_or_else(|_| "sonar-pro".to_string()),
            openai_api_key: non_empty("OPENAI_API_KEY"),
            extraction_model: env::var("EXTRACTION_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            resend_api_key: non_empty("RESEND_API_KEY"),
            email_from: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "Avalúos <onboarding@resend.dev>".to_string()),
            supabase_url: non_empty("SUPABASE_URL"),
            supabase_service_role_key: non_empty("SUPABASE_SERVICE_ROLE_KEY"),
            storage_bucket: env::var("STORAGE_BUCKET").unwrap_or_else(|_| "uploads".to_string()),
            valuations_table: env::var("VALUATIONS_TABLE")
                .unwrap_or_else(|_| "valuations".to_string()),
            magic_link_redirect: env::var("MAGIC_LINK_REDIRECT")
                .unwrap_or_else(|_| "http://localhost:3000/dashboard".to_string()),
        })
    }

    /// Supabase URL and key, only when both are set.
    pub fn supabase_credentials(&self) -> Option<(String, String)> {
        match (&self.supabase_url, &self.supabase_service_role_key) {
            (Some(url), Some(key)) => Some((url.clone(), key.clone())),
            _ => None,
        }
    }
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
