//! Analysis domain - the `/analyze` pipeline
//!
//! research (search model) → extract (JSON model) → valuate → persist.
//! Each step runs once, in order; nothing is retried.

pub mod actions;
pub mod error;
pub mod extraction;
pub mod prompts;

pub use actions::run_analysis;
pub use error::AnalysisError;
pub use extraction::{parse_extraction, strip_code_fences, ExtractionPayload};
