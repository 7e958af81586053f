use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{catalog::Sku, errors::ServiceError, AppState};

pub const PRODUCT_ADDED_MESSAGE: &str = "Product added successfully";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SkuListResponse {
    pub skus: Vec<Sku>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddProductResponse {
    #[schema(example = "Product added successfully")]
    pub message: String,
    pub product: Sku,
}

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/skus", get(list_skus))
        .route("/add-product", post(add_product))
}

/// List every SKU in insertion order
#[utoipa::path(
    get,
    path = "/skus",
    responses((status = 200, description = "Catalog returned", body = SkuListResponse)),
    tag = "Catalog"
)]
pub async fn list_skus(State(state): State<AppState>) -> Json<SkuListResponse> {
    Json(SkuListResponse {
        skus: state.services.products.list_skus(),
    })
}

/// Add a product to the in-memory catalog
#[utoipa::path(
    post,
    path = "/add-product",
    request_body = crate::models::sku::AddProductRequest,
    responses(
        (status = 201, description = "Product added", body = AddProductResponse),
        (status = 400, description = "Missing or invalid field", body = crate::errors::ErrorResponse)
    ),
    tag = "Catalog"
)]
pub async fn add_product(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    let product = state.services.products.add_product(&payload)?;

    Ok((
        StatusCode::CREATED,
        Json(AddProductResponse {
            message: PRODUCT_ADDED_MESSAGE.to_string(),
            product,
        }),
    ))
}
