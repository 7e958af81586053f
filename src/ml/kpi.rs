/*!
 * # Forecast KPIs
 *
 * `avg_demand` and `total_forecast` are computed from the forecast itself.
 * `mape`, `fill_rate` and `uplift` need historical actuals and supply data
 * that this service does not have, so they come from a [`KpiProvider`].
 * The only provider shipped is [`MockKpiProvider`], which draws
 * placeholder values from fixed ranges. They are not measurements.
 */

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::catalog::Sku;
use crate::ml::forecasting::DailyForecastPoint;

pub const MOCK_MAPE_RANGE: RangeInclusive<f64> = 8.0..=15.0;
pub const MOCK_FILL_RATE_RANGE: RangeInclusive<f64> = 85.0..=98.0;
pub const MOCK_UPLIFT_RANGE: RangeInclusive<f64> = 15.0..=35.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "mape": 11.4,
    "fill_rate": 92.7,
    "uplift": 0.0,
    "avg_demand": 95.3,
    "total_forecast": 667
}))]
pub struct ForecastKpiSummary {
    /// Mean absolute percentage error, in percent (placeholder)
    pub mape: f64,
    /// Share of demand coverable from supply, in percent (placeholder)
    pub fill_rate: f64,
    /// Promotional demand increase in percent; 0 without a promotion (placeholder)
    pub uplift: f64,
    pub avg_demand: f64,
    pub total_forecast: u64,
}

/// Accuracy and supply figures that cannot be derived from the forecast alone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderMetrics {
    pub mape: f64,
    pub fill_rate: f64,
    pub uplift: f64,
}

pub trait KpiProvider: Send + Sync {
    fn metrics(
        &self,
        forecast: &[DailyForecastPoint],
        sku: &Sku,
        promo_active: bool,
        rng: &mut dyn RngCore,
    ) -> ProviderMetrics;
}

/// Draws placeholder statistics uniformly from fixed ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockKpiProvider;

impl KpiProvider for MockKpiProvider {
    fn metrics(
        &self,
        _forecast: &[DailyForecastPoint],
        _sku: &Sku,
        promo_active: bool,
        rng: &mut dyn RngCore,
    ) -> ProviderMetrics {
        let mape = round_to_tenth(rng.gen_range(MOCK_MAPE_RANGE));
        let fill_rate = round_to_tenth(rng.gen_range(MOCK_FILL_RATE_RANGE));
        // uplift follows the request-level promotion flag
        let uplift = if promo_active {
            round_to_tenth(rng.gen_range(MOCK_UPLIFT_RANGE))
        } else {
            0.0
        };

        ProviderMetrics {
            mape,
            fill_rate,
            uplift,
        }
    }
}

#[derive(Clone)]
pub struct KpiCalculator {
    provider: Arc<dyn KpiProvider>,
}

impl Default for KpiCalculator {
    fn default() -> Self {
        Self::new(Arc::new(MockKpiProvider))
    }
}

impl std::fmt::Debug for KpiCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KpiCalculator").finish_non_exhaustive()
    }
}

impl KpiCalculator {
    pub fn new(provider: Arc<dyn KpiProvider>) -> Self {
        Self { provider }
    }

    pub fn summarize(
        &self,
        forecast: &[DailyForecastPoint],
        sku: &Sku,
        promo_active: bool,
        rng: &mut dyn RngCore,
    ) -> ForecastKpiSummary {
        let total_forecast: u64 = forecast.iter().map(|p| u64::from(p.demand)).sum();
        let avg_demand = if forecast.is_empty() {
            0.0
        } else {
            round_to_tenth(total_forecast as f64 / forecast.len() as f64)
        };

        let metrics = self.provider.metrics(forecast, sku, promo_active, rng);

        ForecastKpiSummary {
            mape: metrics.mape,
            fill_rate: metrics.fill_rate,
            uplift: metrics.uplift,
            avg_demand,
            total_forecast,
        }
    }
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
