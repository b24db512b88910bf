use serde::{Deserialize, Serialize};

/// Body of `POST /emails`.
#[derive(Debug, Clone, Serialize)]
pub struct SendEmailRequest {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Resend answers a successful send with the message id only.
#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailResponse {
    pub id: String,
}
