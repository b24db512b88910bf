//! Analysis domain actions

mod run_analysis;

pub use run_analysis::{run_analysis, valuation_record};
