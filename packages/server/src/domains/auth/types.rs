//! Auth domain request types

use serde::Deserialize;

/// Only action the `/auth` route performs.
pub const SEND_MAGIC_LINK: &str = "sendMagicLink";

/// `/auth` request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthActionBody {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
