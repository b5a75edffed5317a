//! Stock alert evaluation
//!
//! A pass loads every active alert, re-reads each alert's product and
//! notifies the operations contact for every alert whose product is at or
//! below its threshold. Passes do not remember earlier notifications: an alert
//! keeps notifying on every pass while the condition holds.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use serde::Serialize;
use shared::AlertDetails;
use tracing::Instrument;
use uuid::Uuid;

use super::notification::{NotificationDispatcher, StockAlertMessage};
use crate::error::AppResult;
use crate::repositories::AlertRepository;

/// Counts collected over one evaluation pass
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct PassReport {
    pub pass_id: Uuid,
    pub evaluated: usize,
    pub notified: usize,
    pub skipped_missing_product: usize,
    pub skipped_scope_mismatch: usize,
    pub above_threshold: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlertOutcome {
    Notified,
    MissingProduct,
    ScopeMismatch,
    AboveThreshold,
}

/// Runs evaluation passes; clones share the overlap guard
#[derive(Clone)]
pub struct AlertEvaluator {
    alerts: Arc<dyn AlertRepository>,
    dispatcher: NotificationDispatcher,
    running: Arc<AtomicBool>,
}

/// Clears the running flag when a pass ends, including on panic
struct PassGuard<'a>(&'a AtomicBool);

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AlertEvaluator {
    pub fn new(alerts: Arc<dyn AlertRepository>, dispatcher: NotificationDispatcher) -> Self {
        Self {
            alerts,
            dispatcher,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run a pass unless one is already in progress
    pub async fn try_run_pass(&self) -> Option<PassReport> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Alert evaluation already in progress, skipping");
            return None;
        }
        let _guard = PassGuard(&self.running);

        Some(self.run_pass().await)
    }

    /// Evaluate every active alert once. Never fails; errors are logged.
    pub async fn run_pass(&self) -> PassReport {
        let pass_id = Uuid::new_v4();
        let span = tracing::info_span!("alert_pass", %pass_id);
        self.evaluate_all(pass_id).instrument(span).await
    }

    async fn evaluate_all(&self, pass_id: Uuid) -> PassReport {
        let mut report = PassReport {
            pass_id,
            ..PassReport::default()
        };

        let alerts = match self.alerts.list_active().await {
            Ok(alerts) => alerts,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load active alerts");
                return report;
            }
        };

        tracing::debug!(count = alerts.len(), "Evaluating active alerts");

        for details in &alerts {
            report.evaluated += 1;
            match self.evaluate_alert(details).await {
                Ok(AlertOutcome::Notified) => report.notified += 1,
                Ok(AlertOutcome::MissingProduct) => report.skipped_missing_product += 1,
                Ok(AlertOutcome::ScopeMismatch) => report.skipped_scope_mismatch += 1,
                Ok(AlertOutcome::AboveThreshold) => report.above_threshold += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::error!(alert_id = details.alert.id, error = %e, "Alert evaluation failed");
                }
            }
        }

        tracing::info!(
            evaluated = report.evaluated,
            notified = report.notified,
            failed = report.failed,
            "Alert evaluation pass finished"
        );
        report
    }

    async fn evaluate_alert(&self, details: &AlertDetails) -> AppResult<AlertOutcome> {
        let alert = &details.alert;

        let Some(product) = self.alerts.get_product_by_id(alert.product_id).await? else {
            tracing::debug!(alert_id = alert.id, product_id = alert.product_id, "Product no longer exists");
            return Ok(AlertOutcome::MissingProduct);
        };

        if !alert.applies_to_store(product.store_id) {
            tracing::debug!(
                alert_id = alert.id,
                alert_store_id = ?alert.store_id,
                product_store_id = product.store_id,
                "Product moved out of the alert's store"
            );
            return Ok(AlertOutcome::ScopeMismatch);
        }

        if !alert.is_breached_by(product.quantity) {
            return Ok(AlertOutcome::AboveThreshold);
        }

        let message = StockAlertMessage::ThresholdReached {
            product_name: product.name.clone(),
            location: details.location_name().to_string(),
            quantity: product.quantity,
            threshold: alert.threshold,
        };
        self.dispatcher.dispatch(&message).await?;

        tracing::info!(
            alert_id = alert.id,
            product_id = product.id,
            quantity = product.quantity,
            threshold = alert.threshold,
            "Stock alert notification sent"
        );
        Ok(AlertOutcome::Notified)
    }
}
