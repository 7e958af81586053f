/*!
 * # Forecasting Engine
 *
 * Demand model, 7-day forecast generator and KPI summary used by
 * `POST /predict`.
 *
 * All randomness is injected: callers pass an `RngCore` (see
 * [`random::RandomSource`]) so tests can run the stochastic parts against a
 * seeded generator.
 */

/// Single-day demand estimate
pub mod demand_model;

/// Multi-day forecast
pub mod forecasting;

/// KPI summary and placeholder statistics
pub mod kpi;

pub mod random;

pub use demand_model::{BaselineDemandTable, DemandEstimate, DemandFactors, DemandModel};
pub use forecasting::{DailyForecastPoint, ForecastGenerator, FORECAST_HORIZON_DAYS};
pub use kpi::{ForecastKpiSummary, KpiCalculator, KpiProvider, MockKpiProvider};
pub use random::RandomSource;
