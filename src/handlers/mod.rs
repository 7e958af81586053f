pub mod forecasts;
pub mod health;
pub mod products;

use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::ml::RandomSource;
use crate::services::{forecasting::ForecastService, product_service::ProductService};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone, Debug)]
pub struct AppServices {
    pub products: Arc<ProductService>,
    pub forecasting: Arc<ForecastService>,
}

impl AppServices {
    /// Default services over a shared catalog
    pub fn new(catalog: Arc<CatalogStore>, random: RandomSource) -> Self {
        Self {
            products: Arc::new(ProductService::new(catalog.clone())),
            forecasting: Arc::new(ForecastService::with_defaults(catalog, random)),
        }
    }
}
