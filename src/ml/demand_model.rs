/*!
 * # Demand Model
 *
 * Single-day demand estimate for a SKU at a candidate price.
 *
 * The estimate is split in two steps so the deterministic part can be
 * tested exactly:
 *
 * 1. [`DemandModel::expected_demand`]: baseline × price elasticity ×
 *    promotional lift × day-of-week seasonality, floored at zero.
 * 2. [`DemandModel::estimate`]: Gaussian noise with a standard deviation of
 *    10% of the expected demand, truncated to whole units, plus a fixed
 *    ±15% confidence band around the noisy value.
 *
 * The band is an envelope around the point estimate, not a variance-derived
 * interval.
 */

use chrono::{Datelike, Weekday};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use rust_decimal::prelude::ToPrimitive;
use std::collections::HashMap;

use crate::catalog::Sku;
use crate::errors::ServiceError;

/// Daily units assumed for SKUs missing from the baseline table
pub const DEFAULT_BASELINE_UNITS: f64 = 50.0;
/// Demand change per unit of relative price change
pub const PRICE_ELASTICITY: f64 = 0.3;
/// Multiplier applied while a promotion runs
pub const PROMO_LIFT: f64 = 1.5;
/// Seasonality multipliers, Monday first
pub const WEEKDAY_FACTORS: [f64; 7] = [1.2, 1.1, 1.0, 1.0, 1.3, 1.4, 1.1];
/// Noise standard deviation as a share of the expected demand
pub const NOISE_RATIO: f64 = 0.1;
/// Band edges as whole percentages of the noisy demand
pub const BAND_LOWER_PERCENT: u64 = 85;
pub const BAND_UPPER_PERCENT: u64 = 115;

/// Average daily unit demand per SKU id.
#[derive(Debug, Clone)]
pub struct BaselineDemandTable {
    entries: HashMap<String, f64>,
    default_units: f64,
}

impl Default for BaselineDemandTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl BaselineDemandTable {
    /// Baselines for the seed catalog
    pub fn standard() -> Self {
        let entries = [
            ("SKU001", 150.0), // bananas
            ("SKU002", 45.0),
            ("SKU003", 80.0),
            ("SKU004", 60.0),
            ("SKU005", 30.0),
            ("SKU006", 55.0),
            ("SKU007", 40.0),
            ("SKU008", 25.0),
            ("SKU009", 20.0),
            ("SKU010", 35.0),
        ]
        .into_iter()
        .map(|(id, units)| (id.to_string(), units))
        .collect();

        Self {
            entries,
            default_units: DEFAULT_BASELINE_UNITS,
        }
    }

    /// Builds a table from explicit entries. Every baseline, the default
    /// included, must be finite and strictly positive.
    pub fn from_entries<I, K>(entries: I, default_units: f64) -> Result<Self, ServiceError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let invalid = |units: f64| !(units.is_finite() && units > 0.0);
        if invalid(default_units) {
            return Err(ServiceError::ValidationError(format!(
                "Default baseline must be positive, got {default_units}"
            )));
        }

        let mut table = HashMap::new();
        for (id, units) in entries {
            let id = id.into();
            if invalid(units) {
                return Err(ServiceError::ValidationError(format!(
                    "Baseline for {id} must be positive, got {units}"
                )));
            }
            table.insert(id, units);
        }

        Ok(Self {
            entries: table,
            default_units,
        })
    }

    pub fn baseline(&self, sku_id: &str) -> f64 {
        self.entries
            .get(sku_id)
            .copied()
            .unwrap_or(self.default_units)
    }
}

/// The multipliers behind one expected-demand figure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandFactors {
    pub baseline: f64,
    pub price_effect: f64,
    pub promo_effect: f64,
    pub weekday_effect: f64,
}

impl DemandFactors {
    /// Product of all factors, never negative
    pub fn expected(&self) -> f64 {
        (self.baseline * self.price_effect * self.promo_effect * self.weekday_effect).max(0.0)
    }
}

/// One day's noisy estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandEstimate {
    pub expected: f64,
    pub demand: u32,
    pub confidence_lower: u32,
    pub confidence_upper: u32,
}

#[derive(Debug, Clone, Default)]
pub struct DemandModel {
    baselines: BaselineDemandTable,
}

impl DemandModel {
    pub fn new(baselines: BaselineDemandTable) -> Self {
        Self { baselines }
    }

    /// `1 + (1 - price / base_price) * 0.3`.
    ///
    /// `base_price` must be strictly positive; the catalog rejects anything
    /// else at creation time.
    pub fn price_effect(price: f64, base_price: f64) -> f64 {
        debug_assert!(base_price > 0.0, "base_price must be positive");
        1.0 + (1.0 - price / base_price) * PRICE_ELASTICITY
    }

    pub fn promo_effect(promo_active: bool) -> f64 {
        if promo_active {
            PROMO_LIFT
        } else {
            1.0
        }
    }

    pub fn weekday_effect(weekday: Weekday) -> f64 {
        WEEKDAY_FACTORS[weekday.num_days_from_monday() as usize]
    }

    pub fn factors(
        &self,
        sku: &Sku,
        price: f64,
        promo_active: bool,
        weekday: Weekday,
    ) -> DemandFactors {
        let base_price = sku.base_price.to_f64().unwrap_or_default();
        DemandFactors {
            baseline: self.baselines.baseline(&sku.id),
            price_effect: Self::price_effect(price, base_price),
            promo_effect: Self::promo_effect(promo_active),
            weekday_effect: Self::weekday_effect(weekday),
        }
    }

    /// Noise-free demand for the given setting
    pub fn expected_demand(
        &self,
        sku: &Sku,
        price: f64,
        promo_active: bool,
        weekday: Weekday,
    ) -> f64 {
        self.factors(sku, price, promo_active, weekday).expected()
    }

    pub fn estimate<R>(
        &self,
        sku: &Sku,
        price: f64,
        promo_active: bool,
        date: impl Datelike,
        rng: &mut R,
    ) -> DemandEstimate
    where
        R: Rng + ?Sized,
    {
        let expected = self.expected_demand(sku, price, promo_active, date.weekday());
        let demand = apply_noise(expected, rng);
        let (confidence_lower, confidence_upper) = confidence_band(demand);

        DemandEstimate {
            expected,
            demand,
            confidence_lower,
            confidence_upper,
        }
    }
}

/// Perturbs `expected` with zero-mean Gaussian noise (σ = 10% of `expected`)
/// and truncates the result to whole, non-negative units.
pub fn apply_noise<R>(expected: f64, rng: &mut R) -> u32
where
    R: Rng + ?Sized,
{
    let expected = expected.max(0.0);
    let noise = Normal::new(0.0, expected * NOISE_RATIO)
        .map(|normal| normal.sample(rng))
        .unwrap_or(0.0);
    (expected + noise).max(0.0) as u32
}

/// `(floor(0.85 × demand), floor(1.15 × demand))` in integer arithmetic, so
/// a demand of 180 yields exactly `(153, 207)`.
pub fn confidence_band(demand: u32) -> (u32, u32) {
    let demand = u64::from(demand);
    let scale = |percent: u64| u32::try_from(demand * percent / 100).unwrap_or(u32::MAX);
    (scale(BAND_LOWER_PERCENT), scale(BAND_UPPER_PERCENT))
}
