//! Persistence seams consumed by the services
//!
//! Services only see these traits. The PostgreSQL implementations live in the
//! submodules; tests swap in in-memory ones.

use async_trait::async_trait;
use shared::{Alert, AlertDetails, NewAlert, NewLedgerEntry, Product, ProductFields, Scope, StockItem};

use crate::error::AppResult;

pub mod alert;
pub mod ledger;
pub mod product;

pub use alert::PgAlertRepository;
pub use product::{PgEditTransaction, PgProductRepository};

/// Read access to current product state
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    /// Stock monitoring view, narrowed by product, store or store chain
    async fn list_stock(&self, scope: &Scope) -> AppResult<Vec<StockItem>>;
}

/// Opens failure-atomic units for product edits
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn begin(&self) -> AppResult<Box<dyn EditTransaction>>;
}

/// One product edit in flight.
///
/// Nothing written through a transaction is visible until `commit`. Dropping
/// it without committing discards every appended entry and the product update.
#[async_trait]
pub trait EditTransaction: Send {
    /// Load the product and hold it for the rest of the edit
    async fn find_product(&mut self, id: i32) -> AppResult<Option<Product>>;

    async fn append_entry(&mut self, entry: &NewLedgerEntry) -> AppResult<()>;

    async fn update_product(&mut self, id: i32, fields: &ProductFields) -> AppResult<Product>;

    async fn commit(self: Box<Self>) -> AppResult<()>;
}

/// Threshold alert storage
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// Active alerts with their product and location names
    async fn list_active(&self) -> AppResult<Vec<AlertDetails>>;

    /// Fresh read of a product, bypassing any joined alert data
    async fn get_product_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    async fn create(&self, alert: &NewAlert) -> AppResult<Alert>;

    /// Flip the active flag; `NotFound` when the alert does not exist
    async fn set_active(&self, id: i32, active: bool) -> AppResult<AlertDetails>;

    /// Inactive alerts, newest first
    async fn list_history(&self) -> AppResult<Vec<AlertDetails>>;
}
