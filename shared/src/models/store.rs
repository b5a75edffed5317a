//! Store and store chain models

use serde::{Deserialize, Serialize};

/// A retail chain grouping several stores
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreChain {
    pub id: i32,
    pub name: String,
    pub location: String,
}

/// A single store; every store belongs to exactly one chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Store {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub store_chain_id: i32,
}
