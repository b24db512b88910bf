use thiserror::Error;

use crate::domains::valuation::ValuationError;
use crate::kernel::UpstreamError;

/// Failures of the `/analyze` pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Market search returned no content")]
    EmptyMarketReport,

    #[error("Could not parse extraction reply: {message}")]
    ExtractionParse { message: String, raw: String },

    /// Too few usable listings. Carries the research text so the caller can
    /// see what the search model actually found.
    #[error("Insufficient comparables: found {found} valid, need at least {required}")]
    InsufficientData {
        found: usize,
        required: usize,
        market_report: String,
    },
}

impl AnalysisError {
    pub fn from_valuation(error: ValuationError, market_report: String) -> Self {
        match error {
            ValuationError::InsufficientData { found, required } => Self::InsufficientData {
                found,
                required,
                market_report,
            },
        }
    }
}
