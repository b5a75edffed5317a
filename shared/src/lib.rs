//! Shared types and models for the retail inventory platform
//!
//! Holds the domain model (products, stores, ledger entries, alerts) and the
//! pure logic that classifies product edits into ledger entries. Nothing in
//! this crate performs I/O.

pub mod classification;
pub mod models;
pub mod types;
pub mod validation;

pub use classification::*;
pub use models::*;
pub use types::*;
pub use validation::*;
