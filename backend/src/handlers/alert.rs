//! HTTP handlers for stock alerts

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{Alert, AlertDetails, CreateAlertInput};

use crate::error::{AppError, AppResult};
use crate::services::{alert::ALERT_CREATED, AlertService, PassReport};
use crate::AppState;

/// Operator action result with the message shown to the user
#[derive(Debug, Serialize)]
pub struct AlertActionResponse<T> {
    pub message: &'static str,
    pub alert: T,
}

#[derive(Debug, Deserialize)]
pub struct SetActiveInput {
    pub active: bool,
}

/// Create a threshold alert
pub async fn create_alert(
    State(state): State<AppState>,
    Json(input): Json<CreateAlertInput>,
) -> AppResult<Json<AlertActionResponse<Alert>>> {
    let alert = state.alerts.create(input).await?;
    Ok(Json(AlertActionResponse {
        message: ALERT_CREATED,
        alert,
    }))
}

/// Activate or deactivate an alert
pub async fn set_alert_active(
    State(state): State<AppState>,
    Path(alert_id): Path<i32>,
    Json(input): Json<SetActiveInput>,
) -> AppResult<Json<AlertActionResponse<AlertDetails>>> {
    let alert = state.alerts.set_active(alert_id, input.active).await?;
    Ok(Json(AlertActionResponse {
        message: AlertService::toggle_message(input.active),
        alert,
    }))
}

/// List active alerts
pub async fn list_active_alerts(State(state): State<AppState>) -> AppResult<Json<Vec<AlertDetails>>> {
    let alerts = state.alerts.list_active().await?;
    Ok(Json(alerts))
}

/// List deactivated alerts, newest first
pub async fn list_alert_history(State(state): State<AppState>) -> AppResult<Json<Vec<AlertDetails>>> {
    let alerts = state.alerts.list_history().await?;
    Ok(Json(alerts))
}

/// Run an evaluation pass now
pub async fn evaluate_alerts(State(state): State<AppState>) -> AppResult<Json<PassReport>> {
    let report = state
        .evaluator
        .try_run_pass()
        .await
        .ok_or_else(|| AppError::Conflict("Alert evaluation already in progress".to_string()))?;
    Ok(Json(report))
}
