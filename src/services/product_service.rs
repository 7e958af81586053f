use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::{
    catalog::{CatalogStore, Sku, SkuDraft},
    errors::ServiceError,
};

/// Service for listing and adding catalog products
#[derive(Debug, Clone)]
pub struct ProductService {
    catalog: Arc<CatalogStore>,
}

impl ProductService {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self { catalog }
    }

    pub fn list_skus(&self) -> Vec<Sku> {
        self.catalog.list()
    }

    /// Validates a loosely typed product submission and appends it to the
    /// catalog.
    #[instrument(skip(self, payload))]
    pub fn add_product(&self, payload: &Value) -> Result<Sku, ServiceError> {
        let draft = SkuDraft::from_payload(payload).map_err(|err| {
            debug!(error = %err, "product submission rejected");
            ServiceError::from(err)
        })?;
        Ok(self.catalog.add(draft))
    }
}
