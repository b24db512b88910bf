use serde::Deserialize;
use serde_json::{Map, Value};

use crate::common::utils::{first_present, number_or_numeric_string, text_from_value};
use crate::domains::valuation::ValuationSettings;

/// `/analyze` request body as sent by the client. Every field is optional and
/// loosely typed; [`ValuationRequestBody::into_request`] applies the defaults.
///
/// camelCase keys are canonical. Spanish and snake_case spellings are accepted
/// and lose to the camelCase key when both are sent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct ValuationRequestBody {
    pub property_type: Option<Value>,
    pub neighborhood: Option<Value>,
    pub municipality: Option<Value>,
    pub built_area: Option<Value>,
    pub bedrooms: Option<Value>,
}

impl From<Map<String, Value>> for ValuationRequestBody {
    fn from(object: Map<String, Value>) -> Self {
        let field = |keys: &[&str]| first_present(&object, keys).cloned();

        Self {
            property_type: field(&["propertyType", "tipo_inmueble", "property_type"]),
            neighborhood: field(&["neighborhood", "barrio"]),
            municipality: field(&["municipality", "municipio"]),
            built_area: field(&["builtArea", "area_construida", "built_area"]),
            bedrooms: field(&["bedrooms", "habitaciones"]),
        }
    }
}

impl ValuationRequestBody {
    pub fn into_request(self, settings: &ValuationSettings) -> ValuationRequest {
        let text = |value: Option<Value>| value.as_ref().and_then(text_from_value);

        ValuationRequest {
            property_type: text(self.property_type)
                .unwrap_or_else(|| settings.default_property_type.clone()),
            neighborhood: text(self.neighborhood).unwrap_or_default(),
            municipality: text(self.municipality).unwrap_or_default(),
            built_area: settings.resolve_area(
                self.built_area.as_ref().and_then(number_or_numeric_string),
            ),
            bedrooms: text(self.bedrooms),
        }
    }
}

/// The property being valued. Immutable for the duration of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationRequest {
    pub property_type: String,
    pub neighborhood: String,
    pub municipality: String,
    /// Built area in m², always positive.
    pub built_area: f64,
    pub bedrooms: Option<String>,
}

impl ValuationRequest {
    /// Neighborhood and municipality joined for prompts and display.
    pub fn location(&self) -> String {
        format!("{} {}", self.neighborhood, self.municipality)
            .trim()
            .to_string()
    }

    /// Area range asked of the search step: 70% to 130% of the target.
    pub fn area_band(&self) -> (i64, i64) {
        (
            (self.built_area * 0.7).round() as i64,
            (self.built_area * 1.3).round() as i64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> ValuationRequest {
        serde_json::from_value::<ValuationRequestBody>(value)
            .unwrap()
            .into_request(&ValuationSettings::default())
    }

    #[test]
    fn defaults_apply_to_empty_body() {
        let request = parse(json!({}));
        assert_eq!(request.property_type, "Apartamento");
        assert_eq!(request.built_area, 60.0);
        assert_eq!(request.location(), "");
        assert!(request.bedrooms.is_none());
    }

    #[test]
    fn location_is_joined_and_trimmed() {
        let request = parse(json!({"neighborhood": "Laureles", "municipality": " Medellín "}));
        assert_eq!(request.location(), "Laureles Medellín");

        let request = parse(json!({"municipality": "Envigado"}));
        assert_eq!(request.location(), "Envigado");
    }

    #[test]
    fn area_accepts_form_strings_and_rejects_garbage() {
        assert_eq!(parse(json!({"builtArea": "85"})).built_area, 85.0);
        assert_eq!(parse(json!({"builtArea": "n/a"})).built_area, 60.0);
        assert_eq!(parse(json!({"builtArea": -10})).built_area, 60.0);
        assert_eq!(parse(json!({"area_construida": 120})).built_area, 120.0);
    }

    #[test]
    fn bedrooms_accept_text_or_number() {
        assert_eq!(parse(json!({"bedrooms": 3})).bedrooms.as_deref(), Some("3"));
        assert_eq!(parse(json!({"habitaciones": "3+1"})).bedrooms.as_deref(), Some("3+1"));
    }

    #[test]
    fn duplicate_spellings_are_accepted() {
        let request = parse(json!({
            "barrio": "Belén",
            "neighborhood": "Laureles",
            "municipio": "Medellín",
            "builtArea": 80,
            "area_construida": 95
        }));
        assert_eq!(request.neighborhood, "Laureles");
        assert_eq!(request.municipality, "Medellín");
        assert_eq!(request.built_area, 80.0);
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(serde_json::from_value::<ValuationRequestBody>(json!([1, 2])).is_err());
    }

    #[test]
    fn area_band_is_rounded() {
        let request = parse(json!({"builtArea": 80}));
        assert_eq!(request.area_band(), (56, 104));
    }
}
