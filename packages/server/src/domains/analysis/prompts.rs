//! Prompts for the research and extraction models.

use crate::domains::valuation::ValuationRequest;

/// Listings asked of the search model.
pub const MIN_LISTINGS: usize = 15;

pub const SEARCH_SYSTEM_PROMPT: &str = "Eres un analista del mercado inmobiliario colombiano. \
Buscas avisos publicados en portales inmobiliarios y reportas datos concretos: \
tipo de operación, precio, área en m², habitaciones, baños, barrio y enlace al aviso. \
No inventes datos; si un dato no aparece en el aviso, dilo.";

pub const EXTRACTION_SYSTEM_PROMPT: &str = "Extraes datos estructurados de informes de mercado \
inmobiliario. Respondes únicamente con un objeto JSON válido, sin texto adicional.";

/// Research prompt for one target property.
pub fn search_prompt(request: &ValuationRequest) -> String {
    let (min_area, max_area) = request.area_band();
    let location = request.location();
    let location = if location.is_empty() {
        "Colombia".to_string()
    } else {
        location
    };

    let mut prompt = format!(
        "Busca al menos {min} avisos actuales de {kind} en {location} \
con área construida entre {min_area} y {max_area} m².\n\
Incluye principalmente avisos en venta y entre un 20% y un 30% de avisos en arriendo.\n\
Para cada aviso indica: título, tipo de operación (venta o arriendo), precio en pesos \
colombianos (precio total para venta, canon mensual para arriendo), área en m², \
habitaciones, baños, barrio y enlace.\n\
Al final estima la rentabilidad mensual de arriendo de la zona (canon / valor del inmueble).",
        min = MIN_LISTINGS,
        kind = request.property_type,
    );

    if let Some(bedrooms) = &request.bedrooms {
        prompt.push_str(&format!(
            "\nPrioriza inmuebles con {} habitaciones.",
            bedrooms
        ));
    }

    prompt
}

/// Extraction prompt wrapping the research text.
pub fn extraction_prompt(market_report: &str) -> String {
    format!(
        "A partir del siguiente informe, devuelve un objeto JSON con esta forma exacta:\n\
{{\n\
  \"comparables\": [\n\
    {{\n\
      \"titulo\": string,\n\
      \"tipo_operacion\": \"venta\" | \"arriendo\",\n\
      \"precio\": number | null,\n\
      \"area_m2\": number | null,\n\
      \"habitaciones\": number | null,\n\
      \"banos\": number | null,\n\
      \"barrio\": string | null,\n\
      \"fuente\": string | null\n\
    }}\n\
  ],\n\
  \"yield_zona\": number | null,\n\
  \"resumen_mercado\": string\n\
}}\n\
Los precios van en pesos como números sin separadores. \"yield_zona\" es la rentabilidad \
mensual como fracción (por ejemplo 0.005 para 0,5%).\n\n\
INFORME:\n{market_report}"
    )
}
