//! Send magic link action

use tracing::info;

use crate::common::utils::{is_valid_email, required_text};
use crate::common::ServiceError;
use crate::domains::auth::types::{AuthActionBody, SEND_MAGIC_LINK};
use crate::kernel::ServerDeps;

/// Dispatch an `/auth` body. Returns the address the link was sent to.
pub async fn send_magic_link(body: AuthActionBody, deps: &ServerDeps) -> Result<String, ServiceError> {
    let action = required_text(body.action.as_deref()).ok_or(ServiceError::MissingField("action"))?;
    if action != SEND_MAGIC_LINK {
        return Err(ServiceError::Invalid(format!("Unsupported action: {}", action)));
    }

    let email = required_text(body.email.as_deref()).ok_or(ServiceError::MissingField("email"))?;
    if !is_valid_email(email) {
        return Err(ServiceError::InvalidAddress(email.to_string()));
    }

    let auth = deps
        .auth
        .as_ref()
        .ok_or(ServiceError::NotConfigured("SUPABASE_URL"))?;

    auth.send_magic_link(email, &deps.magic_link_redirect).await?;
    info!(email = %email, "Magic link sent");

    Ok(email.to_string())
}
