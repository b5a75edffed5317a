//! Product models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::classification::OperationType;
use crate::validation::{validate_not_blank, validate_price};

/// Current-state snapshot of a product. History lives in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub store_id: i32,
}

/// The mutable fields of a product, as written by an edit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub store_id: i32,
}

impl Product {
    /// Apply edited fields, keeping the identity
    pub fn with_fields(&self, fields: &ProductFields) -> Product {
        Product {
            id: self.id,
            name: fields.name.clone(),
            category: fields.category.clone(),
            description: fields.description.clone(),
            price: fields.price,
            quantity: fields.quantity,
            store_id: fields.store_id,
        }
    }
}

/// Operator edit of a product, with the declared intent of the edit
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EditProductInput {
    #[validate(custom(function = "validate_not_blank", message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_not_blank", message = "Category is required"))]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom = "validate_price")]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
    pub store_id: i32,
    /// Operator-declared kind of edit (sale, restock, return, adjustment)
    pub operation: OperationType,
    /// Free text recorded as reason / supplier on the ledger entry
    #[serde(default)]
    pub details: String,
}

impl EditProductInput {
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            description: self.description.clone(),
            price: self.price,
            quantity: self.quantity,
            store_id: self.store_id,
        }
    }
}

/// Stock monitoring row: a product with its resolved location names
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockItem {
    pub id: i32,
    pub product_name: String,
    pub category: String,
    pub quantity: i32,
    pub price: Decimal,
    /// Store name, or "-" when the store cannot be resolved
    pub store_name: String,
    /// Store chain name, or "-" when the chain cannot be resolved
    pub store_chain_name: String,
}
