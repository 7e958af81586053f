use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SKU Forecast API",
        version = "0.1.0",
        description = r#"
# SKU Demand Forecast API

Serves a retail SKU catalog and a 7-day demand forecast for a candidate price
and promotion setting.

- `mape`, `fill_rate` and `uplift` in the KPI summary are placeholder values,
  not measurements against historical actuals.
- The catalog lives in memory and resets on restart.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development")
    ),
    tags(
        (name = "Catalog", description = "SKU listing and product creation"),
        (name = "Forecasting", description = "Demand forecasts and KPIs"),
        (name = "Health", description = "Health check endpoints")
    ),
    paths(
        crate::handlers::products::list_skus,
        crate::handlers::products::add_product,
        crate::handlers::forecasts::predict,
        crate::handlers::health::health_check,
        crate::handlers::health::health_details,
    ),
    components(
        schemas(
            crate::catalog::Sku,
            crate::models::sku::AddProductRequest,
            crate::handlers::products::SkuListResponse,
            crate::handlers::products::AddProductResponse,
            crate::services::forecasting::PredictRequest,
            crate::services::forecasting::PredictionResponse,
            crate::ml::DailyForecastPoint,
            crate::ml::ForecastKpiSummary,
            crate::handlers::health::HealthResponse,
            crate::handlers::health::HealthDetailsResponse,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_endpoint() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();
        for path in ["/skus", "/add-product", "/predict", "/health"] {
            assert!(json.contains(path), "missing {path}");
        }
    }
}
