//! Domain models for the retail inventory platform

mod alert;
mod ledger;
mod product;
mod store;

pub use alert::*;
pub use ledger::*;
pub use product::*;
pub use store::*;
