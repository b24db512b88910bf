/// Constants that drive normalization and valuation.
///
/// `Default` holds the production values. Tests and callers override fields
/// directly rather than touching module-level state.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationSettings {
    /// Monthly yield used when the extraction step reports none (0.55%).
    pub fallback_yield_rate: f64,
    /// Built area in m² used when the request carries no usable area.
    pub fallback_area: f64,
    /// Valid comparables required before a value is produced.
    pub min_comparables: usize,
    pub sale_weight: f64,
    pub yield_weight: f64,
    /// Half-width of the output band as a fraction of the final value.
    pub band_ratio: f64,
    /// Sale-equivalent values above this many pesos are treated as extraction errors.
    pub max_capital_value: f64,
    /// Case-insensitive marker for rental listings in the operation field.
    pub rental_keyword: String,
    pub default_property_type: String,
    pub default_title: String,
    /// Portals reported as sources when no citation URL resolves to a host.
    pub default_sources: Vec<String>,
}

impl Default for ValuationSettings {
    fn default() -> Self {
        Self {
            fallback_yield_rate: 0.0055,
            fallback_area: 60.0,
            min_comparables: 5,
            sale_weight: 0.6,
            yield_weight: 0.4,
            band_ratio: 0.05,
            max_capital_value: 1e13,
            rental_keyword: "arriendo".to_string(),
            default_property_type: "Apartamento".to_string(),
            default_title: "Inmueble".to_string(),
            default_sources: vec!["fincaraiz".to_string(), "metrocuadrado".to_string()],
        }
    }
}

impl ValuationSettings {
    /// Yield reported by the extraction step if usable, otherwise the fallback.
    pub fn resolve_yield_rate(&self, reported: Option<f64>) -> f64 {
        match reported {
            Some(rate) if rate.is_finite() && rate > 0.0 => rate,
            _ => self.fallback_yield_rate,
        }
    }

    /// Built area from the request if positive, otherwise the fallback.
    pub fn resolve_area(&self, area: Option<f64>) -> f64 {
        match area {
            Some(area) if area.is_finite() && area > 0.0 => area,
            _ => self.fallback_area,
        }
    }
}
