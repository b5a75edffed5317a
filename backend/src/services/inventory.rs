//! Product state updates and the ledger entries that accompany them
//!
//! An edit is validated, then classified against the locked product row, and
//! the resulting ledger entries are appended before the new product state is
//! written. All of it commits together or not at all.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use shared::{derive_ledger_entries, EditIntent, EditProductInput, NewLedgerEntry, Product, Scope, StockItem};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::repositories::{InventoryStore, ProductRepository};

/// Result of a committed edit
#[derive(Debug, Clone, Serialize)]
pub struct ProductEdit {
    pub product: Product,
    pub entries: Vec<NewLedgerEntry>,
}

/// Inventory service for product edits and stock monitoring
#[derive(Clone)]
pub struct InventoryService {
    products: Arc<dyn ProductRepository>,
    store: Arc<dyn InventoryStore>,
}

impl InventoryService {
    pub fn new(products: Arc<dyn ProductRepository>, store: Arc<dyn InventoryStore>) -> Self {
        Self { products, store }
    }

    /// Apply an operator edit to a product, recording ledger entries for it
    pub async fn edit_product(&self, id: i32, input: EditProductInput) -> AppResult<ProductEdit> {
        input.validate()?;

        let mut tx = self.store.begin().await?;

        let current = tx
            .find_product(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let entries = derive_ledger_entries(&current, &EditIntent::from(&input), Utc::now());
        for entry in &entries {
            tx.append_entry(entry).await?;
        }

        let product = tx.update_product(id, &input.fields()).await?;
        tx.commit().await?;

        tracing::info!(
            product_id = id,
            operation = input.operation.as_str(),
            entries = entries.len(),
            quantity_change = ?entries.iter().find_map(NewLedgerEntry::quantity),
            "Product updated"
        );

        Ok(ProductEdit { product, entries })
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: i32) -> AppResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    /// Stock levels, optionally narrowed to a product, store or chain
    pub async fn list_stock(&self, scope: &Scope) -> AppResult<Vec<StockItem>> {
        self.products.list_stock(scope).await
    }
}
