//! Pure Resend REST API client.
//!
//! Covers the single endpoint the valuation service needs: sending one
//! transactional HTML email.
//!
//! # Example
//!
//! ```rust,ignore
//! use resend_client::ResendClient;
//!
//! let client = ResendClient::new("re_123".into(), "Avalúos <avaluos@example.com>".into());
//! let sent = client.send_email("buyer@example.com", "Tu avalúo", "<p>Hola</p>").await?;
//! println!("queued as {}", sent.id);
//! ```

pub mod error;
pub mod types;

pub use error::{ResendError, Result};
pub use types::{SendEmailRequest, SendEmailResponse};

const BASE_URL: &str = "https://api.resend.com";

pub struct ResendClient {
    client: reqwest::Client,
    api_key: String,
    from: String,
    base_url: String,
}

impl ResendClient {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            from,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Send one HTML email. No retries; a non-2xx answer is returned with its body.
    pub async fn send_email(&self, to: &str, subject: &str, html: &str) -> Result<SendEmailResponse> {
        let request = SendEmailRequest {
            from: self.from.clone(),
            to: vec![to.to_string()],
            subject: subject.to_string(),
            html: html.to_string(),
        };

        let resp = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Resend rejected email");
            return Err(ResendError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let sent: SendEmailResponse = resp.json().await?;
        tracing::info!(email_id = %sent.id, "Email accepted by Resend");
        Ok(sent)
    }
}
