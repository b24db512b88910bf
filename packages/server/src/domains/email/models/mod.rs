use serde::Deserialize;

/// `/send-email` request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendEmailBody {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, alias = "htmlBody")]
    pub html: Option<String>,
}
