use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use utoipa::ToSchema;

use crate::{
    catalog::{CatalogStore, Sku},
    errors::ServiceError,
    ml::{DailyForecastPoint, ForecastGenerator, ForecastKpiSummary, KpiCalculator, RandomSource},
};

pub const SKU_NOT_FOUND: &str = "SKU not found";

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({ "sku_id": "SKU001", "price": 2.49, "promo_active": true }))]
pub struct PredictRequest {
    /// Catalog id; anything other than a string never matches a SKU
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub sku_id: Option<Value>,
    /// Candidate price; defaults to 0
    #[serde(default)]
    pub price: f64,
    /// `null` or absent means no promotion
    #[serde(default)]
    pub promo_active: Option<bool>,
}

impl PredictRequest {
    pub fn sku_id(&self) -> Option<&str> {
        self.sku_id.as_ref().and_then(Value::as_str)
    }

    pub fn promo_active(&self) -> bool {
        self.promo_active.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictionResponse {
    pub sku: Sku,
    pub forecast: Vec<DailyForecastPoint>,
    pub kpis: ForecastKpiSummary,
}

/// Resolves the SKU, runs the 7-day forecast and summarizes it
#[derive(Debug)]
pub struct ForecastService {
    catalog: Arc<CatalogStore>,
    generator: ForecastGenerator,
    kpis: KpiCalculator,
    random: RandomSource,
}

impl ForecastService {
    pub fn new(
        catalog: Arc<CatalogStore>,
        generator: ForecastGenerator,
        kpis: KpiCalculator,
        random: RandomSource,
    ) -> Self {
        Self {
            catalog,
            generator,
            kpis,
            random,
        }
    }

    /// Default model and mock KPI provider over the given catalog
    pub fn with_defaults(catalog: Arc<CatalogStore>, random: RandomSource) -> Self {
        Self::new(
            catalog,
            ForecastGenerator::default(),
            KpiCalculator::default(),
            random,
        )
    }

    /// Forecast starting today (local calendar date)
    pub fn predict(&self, request: &PredictRequest) -> Result<PredictionResponse, ServiceError> {
        self.predict_from(request, Local::now().date_naive())
    }

    #[instrument(skip(self, request), fields(sku_id = ?request.sku_id))]
    pub fn predict_from(
        &self,
        request: &PredictRequest,
        start: NaiveDate,
    ) -> Result<PredictionResponse, ServiceError> {
        let sku = request
            .sku_id()
            .and_then(|id| self.catalog.find(id))
            .ok_or_else(|| {
                warn!("forecast requested for unknown SKU");
                ServiceError::NotFound(SKU_NOT_FOUND.to_string())
            })?;

        let promo_active = request.promo_active();
        let (forecast, kpis) = self.random.with_rng(|rng| {
            let forecast = self
                .generator
                .generate(&sku, request.price, promo_active, start, rng);
            let kpis = self.kpis.summarize(&forecast, &sku, promo_active, rng);
            (forecast, kpis)
        });

        debug!(
            price = request.price,
            promo_active,
            total_forecast = kpis.total_forecast,
            "forecast generated"
        );

        Ok(PredictionResponse {
            sku,
            forecast,
            kpis,
        })
    }
}
