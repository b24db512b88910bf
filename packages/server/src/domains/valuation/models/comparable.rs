use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::utils::{first_present, number_from_value, text_from_value};

/// One listing as returned by the extraction model. Untrusted.
///
/// Numeric fields only keep finite JSON numbers; a price sent as `"350.000.000"`
/// or `null` is read as absent. Spanish keys are canonical, English aliases are
/// accepted because the model does not always follow the prompt. When both are
/// present the Spanish key wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawComparable {
    pub titulo: Option<String>,
    pub tipo_operacion: Option<String>,
    pub precio: Option<f64>,
    pub area_m2: Option<f64>,
    pub habitaciones: Option<f64>,
    pub banos: Option<f64>,
    pub barrio: Option<String>,
    pub municipio: Option<String>,
    pub fuente: Option<String>,
}

impl RawComparable {
    /// Read one element of the model's `comparables` array.
    /// Anything that is not an object is skipped by returning `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(object) => Some(Self::from(object)),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for RawComparable {
    fn from(object: Map<String, Value>) -> Self {
        let text = |keys: &[&str]| first_present(&object, keys).and_then(text_from_value);
        let number = |keys: &[&str]| first_present(&object, keys).and_then(number_from_value);

        Self {
            titulo: text(&["titulo", "title"]),
            tipo_operacion: text(&["tipo_operacion", "operation", "operation_type"]),
            precio: number(&["precio", "price"]),
            area_m2: number(&["area_m2", "area"]),
            habitaciones: number(&["habitaciones", "bedrooms"]),
            banos: number(&["banos", "bathrooms"]),
            barrio: text(&["barrio", "location"]),
            municipio: text(&["municipio", "municipality"]),
            fuente: text(&["fuente", "url"]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginType {
    Sale,
    Rental,
}

/// A normalized listing.
///
/// `capital_value` is the sale-equivalent value: the listed price for sales,
/// the capitalized rent for rentals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparable {
    pub title: String,
    pub origin_type: OriginType,
    pub area: Option<f64>,
    pub listed_price: Option<f64>,
    pub capital_value: f64,
    pub price_per_area_unit: f64,
    /// Yield used to capitalize the rent. Rentals only.
    pub periodic_yield: Option<f64>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub neighborhood: String,
    pub municipality: String,
    pub source_url: Option<String>,
}

impl Comparable {
    /// Only valid comparables take part in aggregation.
    pub fn is_valid(&self) -> bool {
        self.capital_value > 0.0 && self.area.is_some_and(|area| area > 0.0)
    }

    pub fn is_rental(&self) -> bool {
        self.origin_type == OriginType::Rental
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_numeric_fields_become_absent() {
        let raw = RawComparable::from_value(json!({
            "titulo": "Apto Laureles",
            "tipo_operacion": "Venta",
            "precio": "420.000.000",
            "area_m2": null,
            "habitaciones": {"n": 3},
            "banos": 2
        }))
        .unwrap();

        assert_eq!(raw.titulo.as_deref(), Some("Apto Laureles"));
        assert_eq!(raw.precio, None);
        assert_eq!(raw.area_m2, None);
        assert_eq!(raw.habitaciones, None);
        assert_eq!(raw.banos, Some(2.0));
    }

    #[test]
    fn english_aliases_are_accepted() {
        let raw = RawComparable::from_value(json!({
            "title": "Casa",
            "operation": "arriendo",
            "price": 2500000,
            "area": 90,
            "location": "Envigado"
        }))
        .unwrap();

        assert_eq!(raw.tipo_operacion.as_deref(), Some("arriendo"));
        assert_eq!(raw.precio, Some(2_500_000.0));
        assert_eq!(raw.area_m2, Some(90.0));
        assert_eq!(raw.barrio.as_deref(), Some("Envigado"));
    }

    #[test]
    fn canonical_key_wins_when_alias_is_also_sent() {
        let raw = RawComparable::from_value(json!({
            "precio": 400000000,
            "price": 1,
            "area_m2": 80,
            "area": null,
            "barrio": "Laureles",
            "location": "Medellín"
        }))
        .unwrap();

        assert_eq!(raw.precio, Some(400_000_000.0));
        assert_eq!(raw.area_m2, Some(80.0));
        assert_eq!(raw.barrio.as_deref(), Some("Laureles"));
    }

    #[test]
    fn null_canonical_key_falls_back_to_alias() {
        let raw = RawComparable::from_value(json!({"area_m2": null, "area": 90})).unwrap();
        assert_eq!(raw.area_m2, Some(90.0));
    }

    #[test]
    fn non_objects_are_skipped() {
        assert!(RawComparable::from_value(json!("apto 80m2")).is_none());
        assert!(RawComparable::from_value(json!(null)).is_none());
        assert!(RawComparable::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn validity_requires_positive_capital_and_area() {
        let mut comparable = Comparable {
            title: "x".into(),
            origin_type: OriginType::Sale,
            area: Some(80.0),
            listed_price: Some(400_000_000.0),
            capital_value: 400_000_000.0,
            price_per_area_unit: 5_000_000.0,
            periodic_yield: None,
            bedrooms: None,
            bathrooms: None,
            neighborhood: String::new(),
            municipality: String::new(),
            source_url: None,
        };
        assert!(comparable.is_valid());

        comparable.area = Some(0.0);
        assert!(!comparable.is_valid());

        comparable.area = None;
        assert!(!comparable.is_valid());

        comparable.area = Some(80.0);
        comparable.capital_value = 0.0;
        assert!(!comparable.is_valid());
    }
}
