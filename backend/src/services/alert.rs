//! Operator actions on stock alerts

use std::sync::Arc;

use shared::{Alert, AlertDetails, CreateAlertInput, NewAlert};
use validator::Validate;

use super::notification::{NotificationDispatcher, StockAlertMessage};
use crate::error::{AppError, AppResult};
use crate::repositories::AlertRepository;

pub const ALERT_CREATED: &str = "Alert created successfully!";
pub const ALERT_ACTIVATED: &str = "Alert activated successfully!";
pub const ALERT_DEACTIVATED: &str = "Alert deactivated successfully!";

const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Alert service for creating and toggling threshold alerts
#[derive(Clone)]
pub struct AlertService {
    alerts: Arc<dyn AlertRepository>,
    dispatcher: NotificationDispatcher,
}

impl AlertService {
    pub fn new(alerts: Arc<dyn AlertRepository>, dispatcher: NotificationDispatcher) -> Self {
        Self { alerts, dispatcher }
    }

    /// Create an alert; it is armed immediately
    pub async fn create(&self, input: CreateAlertInput) -> AppResult<Alert> {
        input.validate()?;

        if self.alerts.get_product_by_id(input.product_id).await?.is_none() {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let alert = self.alerts.create(&NewAlert::from_input(&input)).await?;
        tracing::info!(alert_id = alert.id, product_id = alert.product_id, "Alert created");
        Ok(alert)
    }

    /// Toggle an alert.
    ///
    /// Activation always sends one notification, whatever the current stock.
    /// A failed send is logged and does not undo the toggle.
    pub async fn set_active(&self, id: i32, active: bool) -> AppResult<AlertDetails> {
        let details = self.alerts.set_active(id, active).await?;

        if active {
            let message = StockAlertMessage::Activated {
                product_name: details
                    .product_name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
                location: details.location_name().to_string(),
                threshold: details.alert.threshold,
            };

            if let Err(e) = self.dispatcher.dispatch(&message).await {
                tracing::warn!(alert_id = id, error = %e, "Failed to send activation notification");
            }
        }

        tracing::info!(alert_id = id, active, "Alert toggled");
        Ok(details)
    }

    pub async fn list_active(&self) -> AppResult<Vec<AlertDetails>> {
        self.alerts.list_active().await
    }

    /// Deactivated alerts, newest first
    pub async fn list_history(&self) -> AppResult<Vec<AlertDetails>> {
        self.alerts.list_history().await
    }

    pub fn toggle_message(active: bool) -> &'static str {
        if active {
            ALERT_ACTIVATED
        } else {
            ALERT_DEACTIVATED
        }
    }
}
