//! Parsing the extraction model's reply.

use serde::Deserialize;
use serde_json::Value;

use crate::common::utils::{finite_number, lenient_text};
use crate::domains::valuation::{MarketEvidence, RawComparable};
use crate::kernel::MarketResearch;

/// Shape asked of the extraction model. `comparables` stays untyped until each
/// element is read leniently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionPayload {
    #[serde(default)]
    pub comparables: Vec<Value>,

    #[serde(default, deserialize_with = "finite_number")]
    pub yield_zona: Option<f64>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub resumen_mercado: Option<String>,
}

impl ExtractionPayload {
    /// Combine with the research that produced it.
    pub fn into_evidence(self, research: &MarketResearch) -> MarketEvidence {
        MarketEvidence {
            market_report: research.content.clone(),
            comparables: self
                .comparables
                .into_iter()
                .filter_map(RawComparable::from_value)
                .collect(),
            reported_yield: self.yield_zona,
            market_summary: self.resumen_mercado,
            source_urls: research.citations.clone(),
        }
    }
}

/// Remove a surrounding Markdown code fence (```` ```json ... ``` ````) if present.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") on the opening fence line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Parse the model reply into a payload. The reply must be a JSON object.
pub fn parse_extraction(raw: &str) -> Result<ExtractionPayload, serde_json::Error> {
    let value: Value = serde_json::from_str(strip_code_fences(raw))?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("extraction reply is not a JSON object"));
    }
    serde_json::from_value(value)
}
