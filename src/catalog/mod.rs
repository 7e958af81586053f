/*!
 * # Catalog Store
 *
 * In-memory SKU catalog. Reads (`list`, `find`) share a read lock; `add`
 * assigns the id and appends under a single write lock so concurrent
 * additions never interleave. Nothing is persisted across restarts.
 */

use chrono::{DateTime, Local};
use rust_decimal_macros::dec;
use std::sync::{PoisonError, RwLock};
use tracing::info;

pub use crate::models::sku::{Sku, SkuDraft, SkuValidationError};

/// Prefix for ids synthesized when a submission carries no `sku_id`
pub const GENERATED_ID_PREFIX: &str = "SKU";

/// Builds the id assigned to a submission without `sku_id`.
///
/// Second-level resolution: two additions within the same second collide.
pub fn generated_sku_id(now: DateTime<Local>) -> String {
    format!("{}{}", GENERATED_ID_PREFIX, now.format("%Y%m%d%H%M%S"))
}

/// The fixed catalog loaded at process start
pub fn seed_catalog() -> Vec<Sku> {
    vec![
        Sku::new("SKU001", "Organic Bananas", "Produce", dec!(2.99)),
        Sku::new("SKU002", "Premium Ground Beef", "Meat", dec!(8.99)),
        Sku::new("SKU003", "Whole Milk 1L", "Dairy", dec!(3.49)),
        Sku::new("SKU004", "Fresh Eggs 12ct", "Dairy", dec!(4.99)),
        Sku::new("SKU005", "Organic Avocados", "Produce", dec!(1.99)),
        Sku::new("SKU006", "Chicken Breast", "Meat", dec!(6.99)),
        Sku::new("SKU007", "Greek Yogurt", "Dairy", dec!(5.49)),
        Sku::new("SKU008", "Fresh Spinach", "Produce", dec!(2.49)),
        Sku::new("SKU009", "Salmon Fillets", "Seafood", dec!(12.99)),
        Sku::new("SKU010", "Cherry Tomatoes", "Produce", dec!(3.99)),
    ]
}

#[derive(Debug, Default)]
pub struct CatalogStore {
    skus: RwLock<Vec<Sku>>,
}

impl CatalogStore {
    pub fn new(skus: Vec<Sku>) -> Self {
        Self {
            skus: RwLock::new(skus),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_catalog())
    }

    /// All SKUs in insertion order
    pub fn list(&self) -> Vec<Sku> {
        self.skus
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Exact-match lookup; the first record wins when ids repeat
    pub fn find(&self, id: &str) -> Option<Sku> {
        self.skus
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|sku| sku.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.skus.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a validated draft, synthesizing an id from the local clock
    /// when the draft has none.
    pub fn add(&self, draft: SkuDraft) -> Sku {
        self.add_at(draft, Local::now())
    }

    pub fn add_at(&self, mut draft: SkuDraft, now: DateTime<Local>) -> Sku {
        let mut skus = self.skus.write().unwrap_or_else(PoisonError::into_inner);

        let id = draft.id.take().unwrap_or_else(|| generated_sku_id(now));
        let sku = Sku::from_draft(draft, id);
        skus.push(sku.clone());

        info!(sku_id = %sku.id, category = %sku.category, total = skus.len(), "product added to catalog");
        sku
    }
}
