pub mod forecasting;
pub mod product_service;
