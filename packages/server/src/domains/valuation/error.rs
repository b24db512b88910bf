use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValuationError {
    #[error("Insufficient comparables: found {found} valid, need at least {required}")]
    InsufficientData { found: usize, required: usize },
}
