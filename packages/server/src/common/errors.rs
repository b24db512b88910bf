use thiserror::Error;

use crate::kernel::UpstreamError;

/// Errors from the forwarding actions (email, storage, auth).
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Invalid request: {0}")]
    Invalid(String),

    /// A collaborator's credentials are absent from the environment.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
