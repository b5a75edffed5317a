//! HTTP handlers

pub mod alert;
pub mod health;
pub mod inventory;
pub mod reporting;

pub use alert::*;
pub use health::*;
pub use inventory::*;
pub use reporting::*;
