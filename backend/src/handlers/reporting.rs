//! Reporting handlers for ledger analytics and data export

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::LedgerKind;

use crate::error::{AppError, AppResult};
use crate::services::reporting::{CategoryAlerts, PriceChangeImpact, ReportFilter, ReportingService};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub store_chain_id: Option<i32>,
    pub store_id: Option<i32>,
    pub product_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub format: Option<String>, // "json" or "csv"
}

impl ReportQuery {
    fn filter(&self) -> ReportFilter {
        ReportFilter {
            store_chain_id: self.store_chain_id,
            store_id: self.store_id,
            product_id: self.product_id,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    fn wants_csv(&self) -> bool {
        self.format.as_deref() == Some("csv")
    }
}

/// Render rows as JSON, or as a CSV attachment when requested
fn respond<T: Serialize>(query: &ReportQuery, name: &str, data: Vec<T>) -> AppResult<Response> {
    if query.wants_csv() {
        let csv = ReportingService::export_to_csv(&data)?;
        let disposition = format!("attachment; filename=\"{}.csv\"", name);
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(data).into_response())
    }
}

/// Ledger entries of one kind
pub async fn get_ledger_report(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Response> {
    let kind = LedgerKind::from_path_segment(&kind)
        .ok_or_else(|| AppError::NotFound(format!("Report '{}'", kind)))?;

    let data = state.reporting.get_ledger_report(kind, &query.filter()).await?;
    respond(&query, &kind.path_segment().replace('-', "_"), data)
}

/// Daily sales revenue
pub async fn get_revenue_trend(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Response> {
    let data = state.reporting.get_revenue_trend(&query.filter()).await?;
    respond(&query, "revenue_trend", data)
}

/// Product return rates
pub async fn get_return_rates(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Response> {
    let data = state.reporting.get_return_rates(&query.filter()).await?;
    respond(&query, "return_rates", data)
}

/// Price change counts per reason
pub async fn get_price_change_impact(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Response> {
    let data: Vec<PriceChangeImpact> = state.reporting.get_price_change_impact(&query.filter()).await?;
    respond(&query, "price_change_impact", data)
}

/// Alerts grouped by product category; the CSV form lists the flat rows
pub async fn get_low_stock_alerts(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Response> {
    let filter = query.filter();
    if query.wants_csv() {
        let rows = state.reporting.get_low_stock_alert_rows(&filter).await?;
        return respond(&query, "low_stock_alerts", rows);
    }

    let groups: Vec<CategoryAlerts> = state.reporting.get_low_stock_alerts(&filter).await?;
    Ok(Json(groups).into_response())
}
