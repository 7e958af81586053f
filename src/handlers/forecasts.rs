use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use crate::{
    errors::ServiceError,
    services::forecasting::{PredictRequest, PredictionResponse},
    AppState,
};

pub fn forecast_routes() -> Router<AppState> {
    Router::new().route("/predict", post(predict))
}

/// Generate a 7-day demand forecast for a SKU at a candidate price
#[utoipa::path(
    post,
    path = "/predict",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Forecast and KPI summary", body = PredictionResponse),
        (status = 400, description = "Malformed request body", body = crate::errors::ErrorResponse),
        (status = 404, description = "SKU not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Forecasting"
)]
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ServiceError> {
    let Json(request) = payload?;
    let prediction = state.services.forecasting.predict(&request)?;
    Ok(Json(prediction))
}
