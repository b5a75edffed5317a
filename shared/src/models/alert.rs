//! Stock threshold alert models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Location label used when neither a store nor a chain can be resolved
pub const UNKNOWN_LOCATION: &str = "Unknown Store";

/// A standing threshold rule on one product.
///
/// Scope is narrowed by `store_id` (store-specific) or `store_chain_id`
/// (chain-wide). An inactive alert is kept as history and can be re-armed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    pub id: i32,
    pub product_id: i32,
    pub store_id: Option<i32>,
    pub store_chain_id: Option<i32>,
    pub threshold: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    /// Store-scoped alerts only apply while the product is still assigned to that store
    pub fn applies_to_store(&self, product_store_id: i32) -> bool {
        self.store_id.map_or(true, |store_id| store_id == product_store_id)
    }

    /// Stock at or below the threshold breaches the alert
    pub fn is_breached_by(&self, quantity: i32) -> bool {
        quantity <= self.threshold
    }
}

/// An alert joined with the names needed to describe it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertDetails {
    #[serde(flatten)]
    pub alert: Alert,
    pub product_name: Option<String>,
    pub product_category: Option<String>,
    pub store_name: Option<String>,
    pub store_chain_name: Option<String>,
}

impl AlertDetails {
    /// Store name, falling back to the chain name, then to "Unknown Store"
    pub fn location_name(&self) -> &str {
        self.store_name
            .as_deref()
            .or(self.store_chain_name.as_deref())
            .unwrap_or(UNKNOWN_LOCATION)
    }
}

/// Input for creating an alert
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAlertInput {
    pub product_id: i32,
    pub store_id: Option<i32>,
    pub store_chain_id: Option<i32>,
    #[validate(range(min = 0, message = "Threshold cannot be negative"))]
    pub threshold: i32,
}

/// Alert row about to be inserted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAlert {
    pub product_id: i32,
    pub store_id: Option<i32>,
    pub store_chain_id: Option<i32>,
    pub threshold: i32,
    pub is_active: bool,
}

impl NewAlert {
    /// New alerts are armed immediately
    pub fn from_input(input: &CreateAlertInput) -> Self {
        Self {
            product_id: input.product_id,
            store_id: input.store_id,
            store_chain_id: input.store_chain_id,
            threshold: input.threshold,
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(store_id: Option<i32>, threshold: i32) -> Alert {
        Alert {
            id: 1,
            product_id: 1,
            store_id,
            store_chain_id: None,
            threshold,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn details(store: Option<&str>, chain: Option<&str>) -> AlertDetails {
        AlertDetails {
            alert: alert(None, 5),
            product_name: Some("Milk".to_string()),
            product_category: Some("Dairy".to_string()),
            store_name: store.map(str::to_string),
            store_chain_name: chain.map(str::to_string),
        }
    }

    #[test]
    fn test_store_scope_guard() {
        assert!(alert(None, 5).applies_to_store(7));
        assert!(alert(Some(7), 5).applies_to_store(7));
        assert!(!alert(Some(5), 5).applies_to_store(7));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let alert = alert(None, 5);
        assert!(alert.is_breached_by(3));
        assert!(alert.is_breached_by(5));
        assert!(!alert.is_breached_by(6));
    }

    #[test]
    fn test_location_name_fallbacks() {
        assert_eq!(details(Some("Lidl Obor"), Some("Lidl")).location_name(), "Lidl Obor");
        assert_eq!(details(None, Some("Lidl")).location_name(), "Lidl");
        assert_eq!(details(None, None).location_name(), UNKNOWN_LOCATION);
    }

    #[test]
    fn test_new_alerts_start_active() {
        let input = CreateAlertInput {
            product_id: 3,
            store_id: Some(2),
            store_chain_id: None,
            threshold: 10,
        };
        let new_alert = NewAlert::from_input(&input);
        assert!(new_alert.is_active);
        assert_eq!(new_alert.store_id, Some(2));
    }
}
