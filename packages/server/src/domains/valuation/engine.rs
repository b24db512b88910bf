//! Comparables → point estimate.
//!
//! Two estimates are built side by side: a sale estimate from average price
//! per m², and a yield estimate from average rent capitalized at the market
//! yield. They are blended only when the yield side is backed by at least one
//! real rental listing.

use tracing::{debug, warn};

use super::models::{Comparable, MarketEvidence, ValuationRequest, ValuationResult};
use super::normalizer::{normalize, NormalizeContext};
use super::sources::source_domains;
use super::{ValuationError, ValuationSettings};

/// Aggregates over the valid comparables. Monetary fields are whole pesos.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub final_value: i64,
    pub range_min: i64,
    pub range_max: i64,
    pub sale_value: Option<i64>,
    pub yield_value: Option<i64>,
    pub yield_value_synthetic: bool,
    pub price_per_area_unit: i64,
    pub avg_price_per_area_unit: i64,
    pub avg_periodic_payment: i64,
    pub sale_count: usize,
    pub rental_count: usize,
    /// Valid comparables only, in input order.
    pub comparables: Vec<Comparable>,
}

/// Round to whole pesos. Values outside the `i64` range saturate.
fn round(value: f64) -> i64 {
    let rounded = value.round();
    if !(i64::MIN as f64..i64::MAX as f64).contains(&rounded) {
        warn!(value, "Estimate outside the representable range, saturating");
    }
    rounded as i64
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Value the target from normalized comparables.
///
/// Invalid comparables are dropped first; fewer than
/// `settings.min_comparables` survivors is an error.
pub fn estimate_value(
    settings: &ValuationSettings,
    comparables: Vec<Comparable>,
    target_area: f64,
    yield_rate: f64,
) -> Result<Estimate, ValuationError> {
    let valid: Vec<Comparable> = comparables.into_iter().filter(Comparable::is_valid).collect();

    if valid.len() < settings.min_comparables {
        return Err(ValuationError::InsufficientData {
            found: valid.len(),
            required: settings.min_comparables,
        });
    }

    let (rentals, sales): (Vec<&Comparable>, Vec<&Comparable>) =
        valid.iter().partition(|c| c.is_rental());

    let avg_ppu = mean(sales.iter().map(|c| c.price_per_area_unit)).map(round);
    let sale_value = avg_ppu.map(|ppu| round(ppu as f64 * target_area));
    let avg_price_per_area_unit = avg_ppu.unwrap_or(0);

    let avg_rent = mean(rentals.iter().filter_map(|c| c.listed_price)).map(round);
    let (yield_value, avg_periodic_payment, yield_value_synthetic) = match (avg_rent, sale_value) {
        (Some(rent), _) if yield_rate > 0.0 => (Some(round(rent as f64 / yield_rate)), rent, false),
        (Some(rent), None) => (None, rent, false),
        (_, Some(sale)) => (Some(sale), round(sale as f64 * yield_rate), true),
        (_, None) => (None, 0, false),
    };

    let final_value = match (sale_value, yield_value) {
        (Some(sale), Some(yield_based)) if !rentals.is_empty() && !yield_value_synthetic => round(
            settings.sale_weight * sale as f64 + settings.yield_weight * yield_based as f64,
        ),
        (Some(sale), _) => sale,
        (None, Some(yield_based)) => yield_based,
        (None, None) => 0,
    };

    let price_per_area_unit = if avg_price_per_area_unit != 0 {
        avg_price_per_area_unit
    } else if final_value > 0 {
        round(final_value as f64 / target_area)
    } else {
        0
    };

    let sale_count = sales.len();
    let rental_count = rentals.len();

    debug!(
        sale_count,
        rental_count,
        sale_value = ?sale_value,
        yield_value = ?yield_value,
        yield_value_synthetic,
        final_value,
        "Valuation estimate computed"
    );

    Ok(Estimate {
        final_value,
        range_min: round(final_value as f64 * (1.0 - settings.band_ratio)),
        range_max: round(final_value as f64 * (1.0 + settings.band_ratio)),
        sale_value,
        yield_value,
        yield_value_synthetic,
        price_per_area_unit,
        avg_price_per_area_unit,
        avg_periodic_payment,
        sale_count,
        rental_count,
        comparables: valid,
    })
}

/// Full valuation for one request: normalize, estimate, and assemble the result.
pub fn valuate(
    settings: &ValuationSettings,
    request: &ValuationRequest,
    evidence: MarketEvidence,
) -> Result<ValuationResult, ValuationError> {
    let yield_rate = settings.resolve_yield_rate(evidence.reported_yield);
    let target_area = request.built_area;

    let ctx = NormalizeContext {
        yield_rate,
        neighborhood: &request.neighborhood,
        municipality: &request.municipality,
    };
    let comparables = normalize(&evidence.comparables, &ctx, settings);
    let estimate = estimate_value(settings, comparables, target_area, yield_rate)?;

    Ok(ValuationResult {
        property_type: request.property_type.clone(),
        location: request.location(),
        target_area,
        final_value: estimate.final_value,
        range_min: estimate.range_min,
        range_max: estimate.range_max,
        sale_value: estimate.sale_value,
        yield_value: estimate.yield_value,
        yield_value_synthetic: estimate.yield_value_synthetic,
        price_per_area_unit: estimate.price_per_area_unit,
        avg_price_per_area_unit: estimate.avg_price_per_area_unit,
        avg_periodic_payment: estimate.avg_periodic_payment,
        yield_rate,
        sale_count: estimate.sale_count,
        rental_count: estimate.rental_count,
        total_comparables: estimate.comparables.len(),
        market_summary: evidence.market_summary.unwrap_or_default(),
        sources: source_domains(&evidence.source_urls, &settings.default_sources),
        comparables: estimate.comparables,
        market_report: evidence.market_report,
    })
}
