use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::Sku;
use crate::ml::demand_model::DemandModel;

/// Days covered by every forecast, starting with the request day
pub const FORECAST_HORIZON_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "date": "2024-07-15",
    "demand": 178,
    "confidence_lower": 151,
    "confidence_upper": 204,
    "day_of_week": "Monday"
}))]
pub struct DailyForecastPoint {
    pub date: NaiveDate,
    pub demand: u32,
    pub confidence_lower: u32,
    pub confidence_upper: u32,
    pub day_of_week: String,
}

/// Runs the demand model once per day over the forecast horizon.
#[derive(Debug, Clone, Default)]
pub struct ForecastGenerator {
    model: DemandModel,
}

impl ForecastGenerator {
    pub fn new(model: DemandModel) -> Self {
        Self { model }
    }

    /// Chronological daily points for `start` and the six days after it.
    pub fn generate<R>(
        &self,
        sku: &Sku,
        price: f64,
        promo_active: bool,
        start: NaiveDate,
        rng: &mut R,
    ) -> Vec<DailyForecastPoint>
    where
        R: Rng + ?Sized,
    {
        start
            .iter_days()
            .take(FORECAST_HORIZON_DAYS)
            .map(|date| {
                let estimate = self.model.estimate(sku, price, promo_active, date, rng);
                DailyForecastPoint {
                    date,
                    demand: estimate.demand,
                    confidence_lower: estimate.confidence_lower,
                    confidence_upper: estimate.confidence_upper,
                    day_of_week: weekday_name(date),
                }
            })
            .collect()
    }
}

fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Expected (noise-free) demand for each forecast day, same order as
/// [`ForecastGenerator::generate`].
pub fn expected_curve(
    model: &DemandModel,
    sku: &Sku,
    price: f64,
    promo_active: bool,
    start: NaiveDate,
) -> Vec<f64> {
    start
        .iter_days()
        .take(FORECAST_HORIZON_DAYS)
        .map(|date| model.expected_demand(sku, price, promo_active, date.weekday()))
        .collect()
}
