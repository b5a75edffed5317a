//! Notification dispatch for stock alerts
//!
//! Supports:
//! - Stock alert and activation message rendering
//! - An HTTP mail relay transport
//! - A log-only transport for deployments without a relay
//! - Per-send timeouts

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::Serialize;

use crate::config::{AlertsConfig, MailConfig};
use crate::error::NotificationError;

pub const STOCK_ALERT_SUBJECT: &str = "Stock Alert Triggered";

/// Outbound message transport
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError>;
}

/// Content of a stock alert mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockAlertMessage {
    /// Stock fell to or below the threshold during an evaluation pass
    ThresholdReached {
        product_name: String,
        location: String,
        quantity: i32,
        threshold: i32,
    },
    /// An operator armed the alert
    Activated {
        product_name: String,
        location: String,
        threshold: i32,
    },
}

impl StockAlertMessage {
    pub fn subject(&self) -> &'static str {
        STOCK_ALERT_SUBJECT
    }

    pub fn body(&self) -> String {
        match self {
            StockAlertMessage::ThresholdReached {
                product_name,
                location,
                quantity,
                threshold,
            } => format!(
                "Stock alert triggered for {product_name}.\n\n\
                 Product: {product_name}\n\
                 Store: {location}\n\
                 Current Stock: {quantity}\n\
                 Threshold: {threshold}\n\n\
                 Please restock this product as soon as possible."
            ),
            StockAlertMessage::Activated {
                product_name,
                location,
                threshold,
            } => format!(
                "A stock alert has been activated.\n\n\
                 Product: {product_name}\n\
                 Store: {location}\n\
                 Threshold: {threshold}\n\n\
                 You will be notified when stock falls to or below the threshold."
            ),
        }
    }
}

/// Sends stock alert messages to the operations contact
#[derive(Clone)]
pub struct NotificationDispatcher {
    sender: Arc<dyn NotificationSender>,
    recipient: String,
    timeout: Duration,
}

impl NotificationDispatcher {
    pub fn new(sender: Arc<dyn NotificationSender>, recipient: impl Into<String>, timeout: Duration) -> Self {
        Self {
            sender,
            recipient: recipient.into(),
            timeout,
        }
    }

    pub fn from_config(sender: Arc<dyn NotificationSender>, alerts: &AlertsConfig) -> Self {
        Self::new(sender, alerts.operations_contact.clone(), alerts.send_timeout())
    }

    /// Send one message; a send that outlives the timeout is abandoned
    pub async fn dispatch(&self, message: &StockAlertMessage) -> Result<(), NotificationError> {
        let body = message.body();
        let send = self.sender.send(&self.recipient, message.subject(), &body);

        match tokio::time::timeout(self.timeout, send).await {
            Ok(result) => result,
            Err(_) => Err(NotificationError::Timeout(self.timeout)),
        }
    }
}

#[derive(Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Mail relay client
#[derive(Clone)]
pub struct HttpMailSender {
    endpoint: String,
    api_key: Option<String>,
    from: String,
    http_client: reqwest::Client,
}

impl HttpMailSender {
    pub fn new(endpoint: String, api_key: Option<String>, from: String) -> Self {
        Self {
            endpoint,
            api_key,
            from,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NotificationSender for HttpMailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        let request = MailRequest {
            from: &self.from,
            to,
            subject,
            text: body,
        };

        let mut builder = self
            .http_client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| NotificationError::Transport(format!("Failed to send mail: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(NotificationError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Writes messages to the log instead of delivering them
#[derive(Debug, Default, Clone)]
pub struct TracingSender;

#[async_trait]
impl NotificationSender for TracingSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        tracing::info!(to, subject, body, "Mail relay not configured; notification logged only");
        Ok(())
    }
}

/// Pick the transport for the configured mail settings
pub fn sender_from_config(mail: &MailConfig) -> Arc<dyn NotificationSender> {
    match &mail.endpoint {
        Some(endpoint) if !endpoint.trim().is_empty() => Arc::new(HttpMailSender::new(
            endpoint.clone(),
            mail.api_key.clone(),
            mail.from.clone(),
        )),
        _ => Arc::new(TracingSender),
    }
}
