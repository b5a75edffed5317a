//! Classification of product edits into ledger entries
//!
//! An edit carries the product's previous snapshot, the requested price and
//! quantity, and an operator-declared operation type. Price and quantity are
//! classified independently: a single edit yields at most one price change
//! and at most one quantity-based entry.
//!
//! The quantity rules follow the operator intent literally. A quantity
//! increase declared as a sale is still recorded as a sale, and a decrease
//! declared as a restock is still recorded as a restock, even though both
//! contradict the direction of the change. Reports built on the ledger depend
//! on this behaviour, so it is kept as-is.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    EditProductInput, NewAdjustment, NewLedgerEntry, NewPriceChange, NewRestock, NewReturn,
    NewSale, Product,
};

/// Operator-declared kind of a product edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Sale,
    Restock,
    Return,
    Adjustment,
}

impl OperationType {
    pub const ALL: [OperationType; 4] = [
        OperationType::Sale,
        OperationType::Restock,
        OperationType::Return,
        OperationType::Adjustment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Sale => "sale",
            OperationType::Restock => "restock",
            OperationType::Return => "return",
            OperationType::Adjustment => "adjustment",
        }
    }
}

/// Sign of a quantity edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityDirection {
    Increased,
    Decreased,
    Unchanged,
}

impl QuantityDirection {
    pub fn between(previous: i32, requested: i32) -> Self {
        match requested.cmp(&previous) {
            std::cmp::Ordering::Greater => QuantityDirection::Increased,
            std::cmp::Ordering::Less => QuantityDirection::Decreased,
            std::cmp::Ordering::Equal => QuantityDirection::Unchanged,
        }
    }
}

/// Quantity-based ledger entry selected for an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityEntryKind {
    Sale,
    Restock,
    Return,
    Adjustment,
}

/// Select the quantity-based entry for an edit.
///
/// Total over every direction and operation type:
///
/// | direction | operation | entry      |
/// |-----------|-----------|------------|
/// | increased | sale      | Sale       |
/// | increased | other     | Adjustment |
/// | decreased | restock   | Restock    |
/// | decreased | other     | Return     |
/// | unchanged | any       | none       |
pub fn classify_quantity_change(
    direction: QuantityDirection,
    operation: OperationType,
) -> Option<QuantityEntryKind> {
    match (direction, operation) {
        (QuantityDirection::Unchanged, _) => None,
        (QuantityDirection::Increased, OperationType::Sale) => Some(QuantityEntryKind::Sale),
        (QuantityDirection::Increased, _) => Some(QuantityEntryKind::Adjustment),
        (QuantityDirection::Decreased, OperationType::Restock) => Some(QuantityEntryKind::Restock),
        (QuantityDirection::Decreased, _) => Some(QuantityEntryKind::Return),
    }
}

/// Requested values of an edit that matter to the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct EditIntent {
    pub price: Decimal,
    pub quantity: i32,
    pub operation: OperationType,
    pub details: String,
}

impl From<&EditProductInput> for EditIntent {
    fn from(input: &EditProductInput) -> Self {
        Self {
            price: input.price,
            quantity: input.quantity,
            operation: input.operation,
            details: input.details.clone(),
        }
    }
}

/// Build the ledger entries an edit must append, price change first.
///
/// Entries are attributed to the store the product belonged to before the
/// edit, and all of them share the timestamp `at`.
pub fn derive_ledger_entries(
    current: &Product,
    intent: &EditIntent,
    at: DateTime<Utc>,
) -> Vec<NewLedgerEntry> {
    let mut entries = Vec::with_capacity(2);

    if intent.price != current.price {
        entries.push(NewLedgerEntry::PriceChange(NewPriceChange {
            product_id: current.id,
            store_id: current.store_id,
            old_price: current.price,
            new_price: intent.price,
            reason: intent.details.clone(),
            changed_at: at,
        }));
    }

    let direction = QuantityDirection::between(current.quantity, intent.quantity);
    let Some(kind) = classify_quantity_change(direction, intent.operation) else {
        return entries;
    };

    let magnitude = (intent.quantity - current.quantity).abs();
    let entry = match kind {
        QuantityEntryKind::Sale => NewLedgerEntry::Sale(NewSale {
            product_id: current.id,
            store_id: current.store_id,
            quantity: magnitude,
            total_price: Decimal::from(magnitude) * current.price,
            sold_at: at,
        }),
        QuantityEntryKind::Restock => NewLedgerEntry::Restock(NewRestock {
            product_id: current.id,
            store_id: current.store_id,
            quantity: magnitude,
            supplier: intent.details.clone(),
            restocked_at: at,
        }),
        QuantityEntryKind::Return => NewLedgerEntry::Return(NewReturn {
            product_id: current.id,
            store_id: current.store_id,
            quantity: magnitude,
            reason: intent.details.clone(),
            returned_at: at,
        }),
        QuantityEntryKind::Adjustment => NewLedgerEntry::Adjustment(NewAdjustment {
            product_id: current.id,
            store_id: current.store_id,
            // previous minus requested: negative when stock went up
            quantity: current.quantity - intent.quantity,
            reason: intent.details.clone(),
            adjusted_at: at,
        }),
    };
    entries.push(entry);

    entries
}
