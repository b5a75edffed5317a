//! Reporting service for ledger analytics and data export
//! Provides ledger listings, revenue trends, return rates, price change impact
//! and low-stock alert summaries

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{validate_date_range, DateRange, LedgerKind};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

const UNKNOWN_PRODUCT: &str = "Unknown";

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Report filter parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportFilter {
    pub store_chain_id: Option<i32>,
    pub store_id: Option<i32>,
    pub product_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReportFilter {
    /// Whole-day range covered by the filter; open ends are unbounded
    pub fn date_range(&self) -> AppResult<DateRange> {
        let start = self
            .start_date
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default());
        let end = self
            .end_date
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(2100, 12, 31).unwrap_or_default());
        let range = DateRange::new(start, end);

        validate_date_range(&range).map_err(|msg| AppError::Validation {
            field: "start_date".to_string(),
            message: msg.to_string(),
        })?;
        Ok(range)
    }
}

/// One ledger entry with its product and store names
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LedgerReportRow {
    pub id: i32,
    pub kind: String,
    pub product_id: i32,
    pub product_name: Option<String>,
    pub store_id: i32,
    pub store_name: Option<String>,
    pub quantity: Option<i32>,
    pub total_price: Option<Decimal>,
    pub old_price: Option<Decimal>,
    pub new_price: Option<Decimal>,
    /// Supplier for restocks, reason for everything else
    pub details: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Sale revenue for one calendar day
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RevenueTrendPoint {
    pub day: NaiveDate,
    pub revenue: Decimal,
    pub quantity: i64,
}

/// Returned versus sold quantity for a product
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReturnRate {
    pub product_id: i32,
    pub product_name: String,
    pub returned_quantity: i64,
    pub total_sold: i64,
    pub return_rate: Decimal,
}

/// Number of price changes recorded for one reason
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PriceChangeImpact {
    pub reason: String,
    pub change_count: i64,
}

/// Alert row used by the low-stock summary
#[derive(Debug, Clone, Serialize, PartialEq, sqlx::FromRow)]
pub struct LowStockAlertRow {
    pub alert_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub category: String,
    pub store_name: Option<String>,
    pub store_chain_name: Option<String>,
    pub threshold: i32,
    pub current_quantity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Alerts sharing a product category
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryAlerts {
    pub category: String,
    pub alerts: Vec<LowStockAlertRow>,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductQuantity {
    product_id: i32,
    product_name: Option<String>,
    quantity: i64,
}

/// Alerts joined with their product and location. A store-scoped alert
/// belongs to its store's chain; a chain-scoped alert to its own chain.
const LOW_STOCK_ALERTS_SQL: &str = r#"
    SELECT a.id AS alert_id, a.product_id, p.name AS product_name, p.category,
           s.name AS store_name, sc.name AS store_chain_name,
           a.threshold, p.quantity AS current_quantity, a.is_active, a.created_at
    FROM alerts a
    JOIN products p ON p.id = a.product_id
    LEFT JOIN stores s ON s.id = a.store_id
    LEFT JOIN store_chains sc ON sc.id = a.store_chain_id
    WHERE ($1::int IS NULL OR a.product_id = $1)
      AND ($2::int IS NULL OR a.store_id = $2)
      AND ($3::int IS NULL OR COALESCE(s.store_chain_id, a.store_chain_id) = $3)
    ORDER BY a.created_at ASC, a.id ASC
"#;

/// Table, timestamp column and kind-specific columns of each ledger kind
fn ledger_source(kind: LedgerKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        LedgerKind::Sale => (
            "sales",
            "sold_at",
            "l.quantity, l.total_price, NULL::numeric AS old_price, NULL::numeric AS new_price, NULL::text AS details",
        ),
        LedgerKind::Restock => (
            "restocks",
            "restocked_at",
            "l.quantity, NULL::numeric AS total_price, NULL::numeric AS old_price, NULL::numeric AS new_price, l.supplier AS details",
        ),
        LedgerKind::Return => (
            "returns",
            "returned_at",
            "l.quantity, NULL::numeric AS total_price, NULL::numeric AS old_price, NULL::numeric AS new_price, l.reason AS details",
        ),
        LedgerKind::Adjustment => (
            "adjustments",
            "adjusted_at",
            "l.quantity, NULL::numeric AS total_price, NULL::numeric AS old_price, NULL::numeric AS new_price, l.reason AS details",
        ),
        LedgerKind::PriceChange => (
            "price_changes",
            "changed_at",
            "NULL::int AS quantity, NULL::numeric AS total_price, l.old_price, l.new_price, l.reason AS details",
        ),
    }
}

/// Combine returned and sold quantities per product.
///
/// Only products with returns are reported. A product without sales is
/// divided by one, so its rate equals the returned quantity.
pub fn compute_return_rates(
    returns: &[(i32, String, i64)],
    sold: &HashMap<i32, i64>,
) -> Vec<ReturnRate> {
    returns
        .iter()
        .map(|(product_id, product_name, returned)| {
            let total_sold = sold.get(product_id).copied().unwrap_or(0);
            let divisor = if total_sold == 0 { 1 } else { total_sold };
            ReturnRate {
                product_id: *product_id,
                product_name: product_name.clone(),
                returned_quantity: *returned,
                total_sold,
                return_rate: (Decimal::from(*returned) / Decimal::from(divisor)).round_dp(4),
            }
        })
        .collect()
}

/// Group alerts by product category, keeping the incoming order within a group
pub fn group_alerts_by_category(alerts: Vec<LowStockAlertRow>) -> Vec<CategoryAlerts> {
    let mut groups: BTreeMap<String, Vec<LowStockAlertRow>> = BTreeMap::new();
    for alert in alerts {
        groups.entry(alert.category.clone()).or_default().push(alert);
    }

    groups
        .into_iter()
        .map(|(category, alerts)| CategoryAlerts { category, alerts })
        .collect()
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List ledger entries of one kind, oldest first
    pub async fn get_ledger_report(
        &self,
        kind: LedgerKind,
        filter: &ReportFilter,
    ) -> AppResult<Vec<LedgerReportRow>> {
        let range = filter.date_range()?;
        let (table, timestamp, columns) = ledger_source(kind);

        let sql = format!(
            r#"
            SELECT l.id, '{kind}' AS kind, l.product_id, p.name AS product_name,
                   l.store_id, s.name AS store_name, {columns}, l.{timestamp} AS recorded_at
            FROM {table} l
            LEFT JOIN products p ON p.id = l.product_id
            LEFT JOIN stores s ON s.id = l.store_id
            WHERE ($1::int IS NULL OR l.product_id = $1)
              AND ($2::int IS NULL OR l.store_id = $2)
              AND ($3::int IS NULL OR s.store_chain_id = $3)
              AND l.{timestamp} BETWEEN $4 AND $5
            ORDER BY l.{timestamp} ASC, l.id ASC
            "#,
            kind = kind.as_str(),
        );

        let rows = sqlx::query_as::<_, LedgerReportRow>(&sql)
            .bind(filter.product_id)
            .bind(filter.store_id)
            .bind(filter.store_chain_id)
            .bind(range.start_instant())
            .bind(range.end_instant())
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    /// Sale revenue and quantity per day
    pub async fn get_revenue_trend(&self, filter: &ReportFilter) -> AppResult<Vec<RevenueTrendPoint>> {
        let range = filter.date_range()?;

        let points = sqlx::query_as::<_, RevenueTrendPoint>(
            r#"
            SELECT (l.sold_at AT TIME ZONE 'UTC')::date AS day,
                   COALESCE(SUM(l.total_price), 0) AS revenue,
                   COALESCE(SUM(l.quantity), 0)::bigint AS quantity
            FROM sales l
            LEFT JOIN stores s ON s.id = l.store_id
            WHERE ($1::int IS NULL OR l.product_id = $1)
              AND ($2::int IS NULL OR l.store_id = $2)
              AND ($3::int IS NULL OR s.store_chain_id = $3)
              AND l.sold_at BETWEEN $4 AND $5
            GROUP BY day
            ORDER BY day ASC
            "#,
        )
        .bind(filter.product_id)
        .bind(filter.store_id)
        .bind(filter.store_chain_id)
        .bind(range.start_instant())
        .bind(range.end_instant())
        .fetch_all(&self.db)
        .await?;

        Ok(points)
    }

    /// Return rates for products with returns in range
    pub async fn get_return_rates(&self, filter: &ReportFilter) -> AppResult<Vec<ReturnRate>> {
        let returns = self.sum_quantity_by_product("returns", "returned_at", filter).await?;
        let sold = self.sum_quantity_by_product("sales", "sold_at", filter).await?;

        let returns: Vec<(i32, String, i64)> = returns
            .into_iter()
            .map(|row| {
                let name = row.product_name.unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());
                (row.product_id, name, row.quantity)
            })
            .collect();
        let sold: HashMap<i32, i64> = sold.into_iter().map(|row| (row.product_id, row.quantity)).collect();

        Ok(compute_return_rates(&returns, &sold))
    }

    async fn sum_quantity_by_product(
        &self,
        table: &str,
        timestamp: &str,
        filter: &ReportFilter,
    ) -> AppResult<Vec<ProductQuantity>> {
        let range = filter.date_range()?;
        let sql = format!(
            r#"
            SELECT l.product_id, p.name AS product_name, COALESCE(SUM(l.quantity), 0)::bigint AS quantity
            FROM {table} l
            LEFT JOIN products p ON p.id = l.product_id
            LEFT JOIN stores s ON s.id = l.store_id
            WHERE ($1::int IS NULL OR l.product_id = $1)
              AND ($2::int IS NULL OR l.store_id = $2)
              AND ($3::int IS NULL OR s.store_chain_id = $3)
              AND l.{timestamp} BETWEEN $4 AND $5
            GROUP BY l.product_id, p.name
            ORDER BY l.product_id
            "#
        );

        let rows = sqlx::query_as::<_, ProductQuantity>(&sql)
            .bind(filter.product_id)
            .bind(filter.store_id)
            .bind(filter.store_chain_id)
            .bind(range.start_instant())
            .bind(range.end_instant())
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    /// Price change counts grouped by reason
    pub async fn get_price_change_impact(&self, filter: &ReportFilter) -> AppResult<Vec<PriceChangeImpact>> {
        let range = filter.date_range()?;

        let rows = sqlx::query_as::<_, PriceChangeImpact>(
            r#"
            SELECT l.reason, COUNT(*) AS change_count
            FROM price_changes l
            LEFT JOIN stores s ON s.id = l.store_id
            WHERE ($1::int IS NULL OR l.product_id = $1)
              AND ($2::int IS NULL OR l.store_id = $2)
              AND ($3::int IS NULL OR s.store_chain_id = $3)
              AND l.changed_at BETWEEN $4 AND $5
            GROUP BY l.reason
            ORDER BY change_count DESC, l.reason ASC
            "#,
        )
        .bind(filter.product_id)
        .bind(filter.store_id)
        .bind(filter.store_chain_id)
        .bind(range.start_instant())
        .bind(range.end_instant())
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Alert rows in scope, oldest first
    pub async fn get_low_stock_alert_rows(&self, filter: &ReportFilter) -> AppResult<Vec<LowStockAlertRow>> {
        let rows = sqlx::query_as::<_, LowStockAlertRow>(LOW_STOCK_ALERTS_SQL)
        .bind(filter.product_id)
        .bind(filter.store_id)
        .bind(filter.store_chain_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Alerts in scope grouped by product category
    pub async fn get_low_stock_alerts(&self, filter: &ReportFilter) -> AppResult<Vec<CategoryAlerts>> {
        let rows = self.get_low_stock_alert_rows(filter).await?;
        Ok(group_alerts_by_category(rows))
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}
