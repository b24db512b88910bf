//! Raw listings → normalized comparables.
//!
//! Total over its input: a malformed record yields a comparable with zero
//! capital value (filtered out later by the engine), never an error.

use tracing::warn;

use super::models::{Comparable, OriginType, RawComparable};
use super::ValuationSettings;

/// Request-scoped values the normalizer needs besides the raw records.
#[derive(Debug, Clone)]
pub struct NormalizeContext<'a> {
    pub yield_rate: f64,
    pub neighborhood: &'a str,
    pub municipality: &'a str,
}

/// Normalize every raw record, preserving input order. Validity is not applied here.
pub fn normalize(
    raw: &[RawComparable],
    ctx: &NormalizeContext<'_>,
    settings: &ValuationSettings,
) -> Vec<Comparable> {
    raw.iter()
        .map(|record| normalize_one(record, ctx, settings))
        .collect()
}

fn normalize_one(
    raw: &RawComparable,
    ctx: &NormalizeContext<'_>,
    settings: &ValuationSettings,
) -> Comparable {
    let origin_type = classify(raw.tipo_operacion.as_deref(), &settings.rental_keyword);
    let listed_price = raw.precio.filter(|p| p.is_finite());
    let area = raw.area_m2.filter(|a| a.is_finite());

    let capital_value = match origin_type {
        OriginType::Sale => listed_price.unwrap_or(0.0),
        OriginType::Rental => match listed_price {
            Some(rent) if ctx.yield_rate > 0.0 => (rent / ctx.yield_rate).round(),
            _ => 0.0,
        },
    };
    let capital_value = if capital_value.is_finite() && capital_value <= settings.max_capital_value
    {
        capital_value
    } else {
        warn!(
            title = ?raw.titulo,
            capital_value,
            ceiling = settings.max_capital_value,
            "Implausible listing value, discarding"
        );
        0.0
    };

    let price_per_area_unit = match area {
        Some(area) if capital_value > 0.0 && area > 0.0 => (capital_value / area).round(),
        _ => 0.0,
    };

    Comparable {
        title: raw
            .titulo
            .clone()
            .unwrap_or_else(|| settings.default_title.clone()),
        origin_type,
        area,
        listed_price,
        capital_value,
        price_per_area_unit,
        periodic_yield: (origin_type == OriginType::Rental).then_some(ctx.yield_rate),
        bedrooms: raw.habitaciones,
        bathrooms: raw.banos,
        neighborhood: raw
            .barrio
            .clone()
            .unwrap_or_else(|| ctx.neighborhood.to_string()),
        municipality: raw
            .municipio
            .clone()
            .unwrap_or_else(|| ctx.municipality.to_string()),
        source_url: raw.fuente.clone(),
    }
}

/// Rental iff the operation contains the rental keyword, case-insensitively.
/// Missing or unrecognized operations count as sales.
fn classify(operation: Option<&str>, rental_keyword: &str) -> OriginType {
    match operation {
        Some(op) if op.to_lowercase().contains(&rental_keyword.to_lowercase()) => {
            OriginType::Rental
        }
        _ => OriginType::Sale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> NormalizeContext<'static> {
        NormalizeContext {
            yield_rate: 0.0055,
            neighborhood: "Laureles",
            municipality: "Medellín",
        }
    }

    fn raw(operation: Option<&str>, price: Option<f64>, area: Option<f64>) -> RawComparable {
        RawComparable {
            tipo_operacion: operation.map(str::to_string),
            precio: price,
            area_m2: area,
            ..Default::default()
        }
    }

    #[test]
    fn rental_is_capitalized_with_yield() {
        let out = normalize(
            &[raw(Some("Arriendo"), Some(1_250_000.0), Some(50.0))],
            &ctx(),
            &ValuationSettings::default(),
        );

        let c = &out[0];
        assert_eq!(c.origin_type, OriginType::Rental);
        assert_eq!(c.capital_value, 227_272_727.0);
        assert_eq!(c.price_per_area_unit, 4_545_455.0);
        assert_eq!(c.periodic_yield, Some(0.0055));
        assert_eq!(c.listed_price, Some(1_250_000.0));
    }

    #[test]
    fn sale_keeps_listed_price() {
        let out = normalize(
            &[raw(Some("VENTA"), Some(400_000_000.0), Some(80.0))],
            &ctx(),
            &ValuationSettings::default(),
        );

        let c = &out[0];
        assert_eq!(c.origin_type, OriginType::Sale);
        assert_eq!(c.capital_value, 400_000_000.0);
        assert_eq!(c.price_per_area_unit, 5_000_000.0);
        assert_eq!(c.periodic_yield, None);
    }

    #[test]
    fn missing_or_unknown_operation_is_sale() {
        let out = normalize(
            &[
                raw(None, Some(1.0), Some(1.0)),
                raw(Some("permuta"), Some(1.0), Some(1.0)),
                raw(Some(""), Some(1.0), Some(1.0)),
            ],
            &ctx(),
            &ValuationSettings::default(),
        );

        assert!(out.iter().all(|c| c.origin_type == OriginType::Sale));
    }

    #[test]
    fn rental_without_usable_yield_has_no_capital_value() {
        let mut context = ctx();
        context.yield_rate = 0.0;

        let out = normalize(
            &[raw(Some("arriendo"), Some(2_000_000.0), Some(70.0))],
            &context,
            &ValuationSettings::default(),
        );

        assert_eq!(out[0].capital_value, 0.0);
        assert_eq!(out[0].price_per_area_unit, 0.0);
        assert!(!out[0].is_valid());
    }

    #[test]
    fn missing_price_or_area_degrades_to_zero() {
        let out = normalize(
            &[
                raw(Some("venta"), None, Some(80.0)),
                raw(Some("venta"), Some(300_000_000.0), None),
                raw(Some("venta"), Some(300_000_000.0), Some(0.0)),
                raw(Some("venta"), Some(f64::NAN), Some(f64::INFINITY)),
            ],
            &ctx(),
            &ValuationSettings::default(),
        );

        assert_eq!(out[0].capital_value, 0.0);
        assert_eq!(out[1].price_per_area_unit, 0.0);
        assert_eq!(out[2].price_per_area_unit, 0.0);
        assert_eq!(out[3].listed_price, None);
        assert_eq!(out[3].area, None);
        assert!(out.iter().all(|c| !c.is_valid()));
        assert!(out
            .iter()
            .all(|c| c.capital_value.is_finite() && c.price_per_area_unit.is_finite()));
    }

    #[test]
    fn implausible_values_are_discarded() {
        let mut context = ctx();
        context.yield_rate = 1e-300;

        let out = normalize(
            &[
                raw(Some("venta"), Some(1e20), Some(80.0)),
                raw(Some("arriendo"), Some(2_000_000.0), Some(80.0)),
                raw(Some("venta"), Some(1e13), Some(80.0)),
            ],
            &context,
            &ValuationSettings::default(),
        );

        assert_eq!(out[0].capital_value, 0.0);
        assert_eq!(out[0].price_per_area_unit, 0.0);
        assert!(!out[0].is_valid());
        assert_eq!(out[1].capital_value, 0.0);
        assert!(!out[1].is_valid());
        assert!(out[2].is_valid());
    }

    #[test]
    fn fallbacks_fill_title_and_location() {
        let mut with_location = raw(Some("venta"), Some(1.0), Some(1.0));
        with_location.barrio = Some("Belén".to_string());
        with_location.titulo = Some("Apto Belén".to_string());

        let out = normalize(
            &[raw(Some("venta"), Some(1.0), Some(1.0)), with_location],
            &ctx(),
            &ValuationSettings::default(),
        );

        assert_eq!(out[0].title, "Inmueble");
        assert_eq!(out[0].neighborhood, "Laureles");
        assert_eq!(out[0].municipality, "Medellín");
        assert_eq!(out[1].title, "Apto Belén");
        assert_eq!(out[1].neighborhood, "Belén");
    }

    #[test]
    fn input_order_is_preserved() {
        let input: Vec<RawComparable> = (1..=6)
            .map(|i| raw(Some("venta"), Some(i as f64 * 100.0), Some(10.0)))
            .collect();

        let out = normalize(&input, &ctx(), &ValuationSettings::default());
        let prices: Vec<f64> = out.iter().map(|c| c.capital_value).collect();
        assert_eq!(prices, vec![100.0, 200.0, 300.0, 400.0, 500.0, 600.0]);
    }
}
