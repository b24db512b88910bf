use serde::Serialize;

use super::{Comparable, RawComparable};

/// Everything the upstream research and extraction steps produced for one request.
#[derive(Debug, Clone, Default)]
pub struct MarketEvidence {
    /// Free text returned by the search model, kept for auditing.
    pub market_report: String,
    pub comparables: Vec<RawComparable>,
    /// `yield_zona` from the extraction step, unvalidated.
    pub reported_yield: Option<f64>,
    /// `resumen_mercado` from the extraction step.
    pub market_summary: Option<String>,
    /// Citation URLs returned by the search model.
    pub source_urls: Vec<String>,
}

/// Final output of one valuation. Monetary figures are rounded to whole pesos.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationResult {
    pub property_type: String,
    pub location: String,
    pub target_area: f64,

    pub final_value: i64,
    pub range_min: i64,
    pub range_max: i64,

    pub sale_value: Option<i64>,
    pub yield_value: Option<i64>,
    /// True when `yield_value` was back-derived from the sale estimate because
    /// no rental comparable was available. A synthetic value is never blended.
    pub yield_value_synthetic: bool,

    /// Price per m² behind `final_value`.
    pub price_per_area_unit: i64,
    pub avg_price_per_area_unit: i64,
    pub avg_periodic_payment: i64,
    pub yield_rate: f64,

    pub sale_count: usize,
    pub rental_count: usize,
    pub total_comparables: usize,

    pub market_summary: String,
    pub sources: Vec<String>,
    pub comparables: Vec<Comparable>,
    pub market_report: String,
}
