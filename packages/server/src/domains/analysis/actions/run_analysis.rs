//! Run analysis action

use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::domains::analysis::error::AnalysisError;
use crate::domains::analysis::extraction::parse_extraction;
use crate::domains::analysis::prompts::{
    extraction_prompt, search_prompt, EXTRACTION_SYSTEM_PROMPT, SEARCH_SYSTEM_PROMPT,
};
use crate::domains::valuation::{valuate, ValuationRequest, ValuationResult};
use crate::kernel::ServerDeps;

/// Value one property from live market research.
///
/// Calls the search model, then the extraction model, then the valuation
/// engine. On success one record is written to the valuation store; a failed
/// write is logged and the result is still returned.
pub async fn run_analysis(
    request: &ValuationRequest,
    deps: &ServerDeps,
) -> Result<ValuationResult, AnalysisError> {
    let search = deps
        .market_search
        .as_ref()
        .ok_or(AnalysisError::NotConfigured("PERPLEXITY_API_KEY"))?;
    let extractor = deps
        .extractor
        .as_ref()
        .ok_or(AnalysisError::NotConfigured("OPENAI_API_KEY"))?;

    info!(
        property_type = %request.property_type,
        location = %request.location(),
        built_area = request.built_area,
        "Starting market analysis"
    );

    // 1. Research
    let research = search
        .research(SEARCH_SYSTEM_PROMPT, &search_prompt(request))
        .await?;
    if research.content.trim().is_empty() {
        return Err(AnalysisError::EmptyMarketReport);
    }
    debug!(
        report_len = research.content.len(),
        citations = research.citations.len(),
        "Market research received"
    );

    // 2. Extract
    let raw = extractor
        .extract_json(EXTRACTION_SYSTEM_PROMPT, &extraction_prompt(&research.content))
        .await?;
    let payload = parse_extraction(&raw).map_err(|e| AnalysisError::ExtractionParse {
        message: e.to_string(),
        raw: raw.clone(),
    })?;
    debug!(
        comparables = payload.comparables.len(),
        yield_zona = ?payload.yield_zona,
        "Extraction parsed"
    );

    // 3. Valuate
    let evidence = payload.into_evidence(&research);
    let result = valuate(&deps.valuation_settings, request, evidence)
        .map_err(|e| AnalysisError::from_valuation(e, research.content.clone()))?;

    info!(
        final_value = result.final_value,
        sale_count = result.sale_count,
        rental_count = result.rental_count,
        "Valuation complete"
    );

    // 4. Persist
    match &deps.valuation_store {
        Some(store) => {
            if let Err(e) = store.insert_valuation(&valuation_record(request, &result)).await {
                error!(error = %e, "Failed to persist valuation");
            }
        }
        None => warn!("Valuation store not configured, skipping persistence"),
    }

    Ok(result)
}

/// Row written to the valuation store for one result.
pub fn valuation_record(request: &ValuationRequest, result: &ValuationResult) -> Value {
    json!({
        "property_type": request.property_type,
        "location": result.location,
        "built_area": request.built_area,
        "final_value": result.final_value,
        "range_min": result.range_min,
        "range_max": result.range_max,
        "total_comparables": result.total_comparables,
        "result": result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{
        MockExtractor, MockMarketSearch, MockValuationStore,
    };
    use crate::kernel::TestDependencies;

    fn request() -> ValuationRequest {
        ValuationRequest {
            property_type: "Apartamento".into(),
            neighborhood: "Laureles".into(),
            municipality: "Medellín".into(),
            built_area: 80.0,
            bedrooms: Some("3".into()),
        }
    }

    fn five_sales() -> Value {
        json!({
            "comparables": [
                {"titulo": "A", "tipo_operacion": "venta", "precio": 400000000, "area_m2": 80},
                {"titulo": "B", "tipo_operacion": "venta", "precio": 420000000, "area_m2": 84},
                {"titulo": "C", "tipo_operacion": "venta", "precio": 380000000, "area_m2": 76},
                {"titulo": "D", "tipo_operacion": "venta", "precio": 450000000, "area_m2": 90},
                {"titulo": "E", "tipo_operacion": "venta", "precio": 350000000, "area_m2": 70}
            ],
            "yield_zona": 0.005,
            "resumen_mercado": "Mercado estable"
        })
    }

    #[tokio::test]
    async fn happy_path_values_and_persists() {
        let deps = TestDependencies::new()
            .mock_search(
                MockMarketSearch::new()
                    .with_research("informe", &["https://www.fincaraiz.com.co/a"]),
            )
            .mock_extractor(MockExtractor::new().with_json(five_sales()));

        let result = run_analysis(&request(), &deps.server_deps()).await.unwrap();

        // every listing is 5,000,000 per m²
        assert_eq!(result.final_value, 400_000_000);
        assert_eq!(result.sale_count, 5);
        assert_eq!(result.yield_rate, 0.005);
        assert_eq!(result.sources, vec!["fincaraiz".to_string()]);
        assert_eq!(result.market_summary, "Mercado estable");

        let records = deps.valuation_store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["final_value"], 400_000_000);
        assert_eq!(records[0]["location"], "Laureles Medellín");

        let prompts = deps.market_search.calls();
        assert!(prompts[0].contains("entre 56 y 104 m²"));
        assert!(deps.extractor.calls()[0].ends_with("informe"));
    }

    #[tokio::test]
    async fn persist_failure_does_not_fail_the_request() {
        let deps = TestDependencies::new()
            .mock_search(MockMarketSearch::new().with_research("informe", &[]))
            .mock_extractor(MockExtractor::new().with_json(five_sales()))
            .mock_store(MockValuationStore::failing(503, "unavailable"));

        assert!(run_analysis(&request(), &deps.server_deps()).await.is_ok());
    }

    #[tokio::test]
    async fn missing_store_skips_persistence() {
        let test_deps = TestDependencies::new()
            .mock_search(MockMarketSearch::new().with_research("informe", &[]))
            .mock_extractor(MockExtractor::new().with_json(five_sales()));
        let mut deps = test_deps.server_deps();
        deps.valuation_store = None;

        assert!(run_analysis(&request(), &deps).await.is_ok());
        assert!(test_deps.valuation_store.records().is_empty());
    }

    #[tokio::test]
    async fn empty_research_is_an_error() {
        let deps = TestDependencies::new()
            .mock_search(MockMarketSearch::new().with_research("   ", &[]));

        let err = run_analysis(&request(), &deps.server_deps()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyMarketReport));
        assert!(deps.extractor.calls().is_empty());
    }

    #[tokio::test]
    async fn search_failure_is_upstream() {
        let deps = TestDependencies::new()
            .mock_search(MockMarketSearch::new().with_error(401, "bad key"));

        let err = run_analysis(&request(), &deps.server_deps()).await.unwrap_err();
        match err {
            AnalysisError::Upstream(upstream) => {
                assert_eq!(upstream.status, Some(401));
                assert_eq!(upstream.body, "bad key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparsable_extraction_keeps_raw_reply() {
        let deps = TestDependencies::new()
            .mock_search(MockMarketSearch::new().with_research("informe", &[]))
            .mock_extractor(MockExtractor::new().with_response("no es json"));

        let err = run_analysis(&request(), &deps.server_deps()).await.unwrap_err();
        match err {
            AnalysisError::ExtractionParse { raw, .. } => assert_eq!(raw, "no es json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn too_few_comparables_carries_report() {
        let deps = TestDependencies::new()
            .mock_search(MockMarketSearch::new().with_research("solo dos avisos", &[]))
            .mock_extractor(MockExtractor::new().with_json(json!({
                "comparables": [
                    {"tipo_operacion": "venta", "precio": 400000000, "area_m2": 80},
                    {"tipo_operacion": "venta", "precio": 0, "area_m2": 80}
                ]
            })));

        let err = run_analysis(&request(), &deps.server_deps()).await.unwrap_err();
        match err {
            AnalysisError::InsufficientData {
                found,
                required,
                market_report,
            } => {
                assert_eq!(found, 1);
                assert_eq!(required, 5);
                assert_eq!(market_report, "solo dos avisos");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(deps.valuation_store.records().is_empty());
    }

    #[tokio::test]
    async fn unconfigured_search_is_reported() {
        let err = run_analysis(&request(), &ServerDeps::unconfigured())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::NotConfigured("PERPLEXITY_API_KEY")));
    }
}
