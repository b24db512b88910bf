//! Canned extraction replies.

#![allow(dead_code)]

use serde_json::{json, Value};

pub const MARKET_REPORT: &str = "Avisos encontrados en Laureles, Medellín: \
    apartamentos entre 70 y 90 m² desde 350 millones.";

pub const CITATIONS: &[&str] = &[
    "https://www.fincaraiz.com.co/apartamento-en-venta/laureles/1",
    "https://www.metrocuadrado.com/inmueble/venta-apartamento-medellin/2",
    "https://fincaraiz.com.co/apartamento-en-arriendo/laureles/3",
];

/// Five sales at exactly 5,000,000 per m².
pub fn sales() -> Vec<Value> {
    vec![
        json!({"titulo": "Apto Laureles", "tipo_operacion": "venta", "precio": 400000000, "area_m2": 80, "habitaciones": 3, "banos": 2}),
        json!({"titulo": "Apto Estadio", "tipo_operacion": "Venta", "precio": 420000000, "area_m2": 84}),
        json!({"titulo": "Apto Conquistadores", "tipo_operacion": "venta", "precio": 380000000, "area_m2": 76}),
        json!({"titulo": "Apto Floresta", "tipo_operacion": "venta", "precio": 450000000, "area_m2": 90}),
        json!({"titulo": "Apto Velódromo", "tipo_operacion": "venta", "precio": 350000000, "area_m2": 70}),
    ]
}

/// One rental whose capitalized value at 0.5% is 480,000,000.
pub fn rental() -> Value {
    json!({"titulo": "Apto en arriendo", "tipo_operacion": "Arriendo", "precio": 2400000, "area_m2": 80})
}

pub fn extraction_reply(comparables: Vec<Value>) -> Value {
    json!({
        "comparables": comparables,
        "yield_zona": 0.005,
        "resumen_mercado": "Oferta amplia y precios estables."
    })
}

pub fn analyze_body() -> Value {
    json!({
        "propertyType": "Apartamento",
        "neighborhood": "Laureles",
        "municipality": "Medellín",
        "builtArea": 80,
        "bedrooms": 3
    })
}
