use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use utoipa::ToSchema;

/// Lead time applied when a new product omits `lead_time_days`
pub const DEFAULT_LEAD_TIME_DAYS: u32 = 3;
/// Minimum order applied when a new product omits `min_order_quantity`
pub const DEFAULT_MIN_ORDER_QUANTITY: u32 = 50;

/// A catalog item.
///
/// `base_price` is the reference price used by the demand model's elasticity
/// term and is always strictly positive for records that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "SKU001",
    "name": "Organic Bananas",
    "category": "Produce",
    "base_price": 2.99
}))]
pub struct Sku {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub base_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_time_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order_quantity: Option<u32>,
}

impl Sku {
    /// Seed-style record without supplier metadata.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        base_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            base_price,
            description: None,
            supplier: None,
            lead_time_days: None,
            min_order_quantity: None,
        }
    }

    pub(crate) fn from_draft(draft: SkuDraft, id: String) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            base_price: draft.base_price,
            description: Some(draft.description),
            supplier: Some(draft.supplier),
            lead_time_days: Some(draft.lead_time_days),
            min_order_quantity: Some(draft.min_order_quantity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkuValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for field: {0}")]
    InvalidField(&'static str),

    #[error("Invalid value for field: base_price (must be positive)")]
    NonPositivePrice,
}

/// Raw `POST /add-product` body, documented for OpenAPI only.
///
/// The handler accepts loosely typed JSON and coerces it through
/// [`SkuDraft::from_payload`].
#[derive(Debug, Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct AddProductRequest {
    pub sku_id: Option<String>,
    pub name: String,
    pub category: String,
    pub base_price: f64,
    pub description: Option<String>,
    pub supplier: Option<String>,
    pub lead_time_days: Option<u32>,
    pub min_order_quantity: Option<u32>,
}

/// A validated product submission that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct SkuDraft {
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub base_price: Decimal,
    pub description: String,
    pub supplier: String,
    pub lead_time_days: u32,
    pub min_order_quantity: u32,
}

impl SkuDraft {
    /// Validates and coerces a loosely typed JSON product submission.
    ///
    /// Required fields are checked in the order `name`, `category`,
    /// `base_price`; the first one that is absent or falsy is reported.
    pub fn from_payload(payload: &Value) -> Result<Self, SkuValidationError> {
        let fields = payload.as_object().ok_or(SkuValidationError::NotAnObject)?;

        let name = required(fields, "name")?;
        let category = required(fields, "category")?;
        let base_price = required(fields, "base_price")?;

        let name = coerce_text(name, "name")?;
        let category = coerce_text(category, "category")?;
        let base_price = coerce_decimal(base_price, "base_price")?;
        if base_price <= Decimal::ZERO {
            return Err(SkuValidationError::NonPositivePrice);
        }

        let id = match fields.get("sku_id") {
            Some(value) if is_truthy(value) => Some(coerce_text(value, "sku_id")?),
            _ => None,
        };

        let lead_time_days =
            optional_count(fields, "lead_time_days")?.unwrap_or(DEFAULT_LEAD_TIME_DAYS);
        let min_order_quantity =
            optional_count(fields, "min_order_quantity")?.unwrap_or(DEFAULT_MIN_ORDER_QUANTITY);
        if min_order_quantity == 0 {
            return Err(SkuValidationError::InvalidField("min_order_quantity"));
        }

        Ok(Self {
            id,
            name,
            category,
            base_price,
            description: optional_text(fields, "description")?,
            supplier: optional_text(fields, "supplier")?,
            lead_time_days,
            min_order_quantity,
        })
    }
}

/// Falsy values (`null`, `""`, `0`, `false`, `[]`, `{}`) count as missing.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn required<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, SkuValidationError> {
    fields
        .get(field)
        .filter(|value| is_truthy(value))
        .ok_or(SkuValidationError::MissingField(field))
}

fn coerce_text(value: &Value, field: &'static str) -> Result<String, SkuValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(SkuValidationError::InvalidField(field)),
    }
}

fn optional_text(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<String, SkuValidationError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(value) => coerce_text(value, field),
    }
}

fn coerce_decimal(value: &Value, field: &'static str) -> Result<Decimal, SkuValidationError> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(SkuValidationError::InvalidField(field)),
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|_| SkuValidationError::InvalidField(field))
}

/// Integer coercion: whole numbers, floats (truncated toward zero) and
/// integer strings. Negative values are rejected.
fn optional_count(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<u32>, SkuValidationError> {
    let invalid = SkuValidationError::InvalidField(field);
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                return u32::try_from(v).map(Some).map_err(|_| invalid);
            }
            match n.as_f64() {
                Some(v) if v.is_finite() && v > -1.0 && v.trunc() <= f64::from(u32::MAX) => {
                    Ok(Some(v.trunc() as u32))
                }
                _ => Err(invalid),
            }
        }
        Some(Value::String(s)) => s.trim().parse::<u32>().map(Some).map_err(|_| invalid),
        Some(_) => Err(invalid),
    }
}
