//! Inventory ledger models
//!
//! Ledger entries are the append-only audit trail behind every report. They are
//! written alongside product edits and never updated afterwards.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kinds of ledger entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    Sale,
    Restock,
    Return,
    PriceChange,
    Adjustment,
}

impl LedgerKind {
    pub const ALL: [LedgerKind; 5] = [
        LedgerKind::Sale,
        LedgerKind::Restock,
        LedgerKind::Return,
        LedgerKind::PriceChange,
        LedgerKind::Adjustment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerKind::Sale => "sale",
            LedgerKind::Restock => "restock",
            LedgerKind::Return => "return",
            LedgerKind::PriceChange => "price_change",
            LedgerKind::Adjustment => "adjustment",
        }
    }

    /// Plural path segment used by report endpoints
    pub fn path_segment(&self) -> &'static str {
        match self {
            LedgerKind::Sale => "sales",
            LedgerKind::Restock => "restocks",
            LedgerKind::Return => "returns",
            LedgerKind::PriceChange => "price-changes",
            LedgerKind::Adjustment => "adjustments",
        }
    }

    pub fn from_path_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.path_segment() == segment)
    }
}

impl std::fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerKind::Sale => write!(f, "Sale"),
            LedgerKind::Restock => write!(f, "Restock"),
            LedgerKind::Return => write!(f, "Return"),
            LedgerKind::PriceChange => write!(f, "Price Change"),
            LedgerKind::Adjustment => write!(f, "Adjustment"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSale {
    pub product_id: i32,
    pub store_id: i32,
    /// Always positive
    pub quantity: i32,
    pub total_price: Decimal,
    pub sold_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRestock {
    pub product_id: i32,
    pub store_id: i32,
    /// Always positive
    pub quantity: i32,
    pub supplier: String,
    pub restocked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReturn {
    pub product_id: i32,
    pub store_id: i32,
    /// Always positive
    pub quantity: i32,
    pub reason: String,
    pub returned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAdjustment {
    pub product_id: i32,
    pub store_id: i32,
    /// Signed and never zero: previous quantity minus new quantity
    pub quantity: i32,
    pub reason: String,
    pub adjusted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPriceChange {
    pub product_id: i32,
    pub store_id: i32,
    pub old_price: Decimal,
    pub new_price: Decimal,
    pub reason: String,
    pub changed_at: DateTime<Utc>,
}

/// A ledger entry about to be appended
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NewLedgerEntry {
    Sale(NewSale),
    Restock(NewRestock),
    Return(NewReturn),
    Adjustment(NewAdjustment),
    PriceChange(NewPriceChange),
}

impl NewLedgerEntry {
    pub fn kind(&self) -> LedgerKind {
        match self {
            NewLedgerEntry::Sale(_) => LedgerKind::Sale,
            NewLedgerEntry::Restock(_) => LedgerKind::Restock,
            NewLedgerEntry::Return(_) => LedgerKind::Return,
            NewLedgerEntry::Adjustment(_) => LedgerKind::Adjustment,
            NewLedgerEntry::PriceChange(_) => LedgerKind::PriceChange,
        }
    }

    pub fn product_id(&self) -> i32 {
        match self {
            NewLedgerEntry::Sale(e) => e.product_id,
            NewLedgerEntry::Restock(e) => e.product_id,
            NewLedgerEntry::Return(e) => e.product_id,
            NewLedgerEntry::Adjustment(e) => e.product_id,
            NewLedgerEntry::PriceChange(e) => e.product_id,
        }
    }

    pub fn store_id(&self) -> i32 {
        match self {
            NewLedgerEntry::Sale(e) => e.store_id,
            NewLedgerEntry::Restock(e) => e.store_id,
            NewLedgerEntry::Return(e) => e.store_id,
            NewLedgerEntry::Adjustment(e) => e.store_id,
            NewLedgerEntry::PriceChange(e) => e.store_id,
        }
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        match self {
            NewLedgerEntry::Sale(e) => e.sold_at,
            NewLedgerEntry::Restock(e) => e.restocked_at,
            NewLedgerEntry::Return(e) => e.returned_at,
            NewLedgerEntry::Adjustment(e) => e.adjusted_at,
            NewLedgerEntry::PriceChange(e) => e.changed_at,
        }
    }

    /// Signed quantity carried by a quantity-based entry; `None` for price changes
    pub fn quantity(&self) -> Option<i32> {
        match self {
            NewLedgerEntry::Sale(e) => Some(e.quantity),
            NewLedgerEntry::Restock(e) => Some(e.quantity),
            NewLedgerEntry::Return(e) => Some(e.quantity),
            NewLedgerEntry::Adjustment(e) => Some(e.quantity),
            NewLedgerEntry::PriceChange(_) => None,
        }
    }
}
