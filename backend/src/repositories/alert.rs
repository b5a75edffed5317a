//! PostgreSQL alert repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{Alert, AlertDetails, NewAlert, Product};
use sqlx::{FromRow, PgPool};

use super::{product::fetch_product, AlertRepository};
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct PgAlertRepository {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct AlertRow {
    id: i32,
    product_id: i32,
    store_id: Option<i32>,
    store_chain_id: Option<i32>,
    threshold: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<AlertRow> for Alert {
    fn from(row: AlertRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            store_id: row.store_id,
            store_chain_id: row.store_chain_id,
            threshold: row.threshold,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct AlertDetailsRow {
    #[sqlx(flatten)]
    alert: AlertRow,
    product_name: Option<String>,
    product_category: Option<String>,
    store_name: Option<String>,
    store_chain_name: Option<String>,
}

impl From<AlertDetailsRow> for AlertDetails {
    fn from(row: AlertDetailsRow) -> Self {
        Self {
            alert: row.alert.into(),
            product_name: row.product_name,
            product_category: row.product_category,
            store_name: row.store_name,
            store_chain_name: row.store_chain_name,
        }
    }
}

const DETAILS_COLUMNS: &str = r#"
    a.id, a.product_id, a.store_id, a.store_chain_id, a.threshold, a.is_active, a.created_at,
    p.name AS product_name, p.category AS product_category,
    s.name AS store_name, sc.name AS store_chain_name
"#;

const DETAILS_JOINS: &str = r#"
    LEFT JOIN products p ON p.id = a.product_id
    LEFT JOIN stores s ON s.id = a.store_id
    LEFT JOIN store_chains sc ON sc.id = a.store_chain_id
"#;

impl PgAlertRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn list_by_state(&self, active: bool) -> AppResult<Vec<AlertDetails>> {
        let order = if active { "a.id ASC" } else { "a.created_at DESC, a.id DESC" };
        let sql = format!(
            "SELECT {} FROM alerts a {} WHERE a.is_active = $1 ORDER BY {}",
            DETAILS_COLUMNS, DETAILS_JOINS, order
        );

        let rows = sqlx::query_as::<_, AlertDetailsRow>(&sql)
            .bind(active)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl AlertRepository for PgAlertRepository {
    async fn list_active(&self) -> AppResult<Vec<AlertDetails>> {
        self.list_by_state(true).await
    }

    async fn get_product_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        fetch_product(&self.db, id).await
    }

    async fn create(&self, alert: &NewAlert) -> AppResult<Alert> {
        let row = sqlx::query_as::<_, AlertRow>(
            r#"
            INSERT INTO alerts (product_id, store_id, store_chain_id, threshold, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, product_id, store_id, store_chain_id, threshold, is_active, created_at
            "#,
        )
        .bind(alert.product_id)
        .bind(alert.store_id)
        .bind(alert.store_chain_id)
        .bind(alert.threshold)
        .bind(alert.is_active)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn set_active(&self, id: i32, active: bool) -> AppResult<AlertDetails> {
        let sql = format!(
            r#"
            WITH a AS (
                UPDATE alerts SET is_active = $2 WHERE id = $1
                RETURNING id, product_id, store_id, store_chain_id, threshold, is_active, created_at
            )
            SELECT {} FROM a {}
            "#,
            DETAILS_COLUMNS, DETAILS_JOINS
        );

        let row = sqlx::query_as::<_, AlertDetailsRow>(&sql)
            .bind(id)
            .bind(active)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Alert".to_string()))?;

        Ok(row.into())
    }

    async fn list_history(&self) -> AppResult<Vec<AlertDetails>> {
        self.list_by_state(false).await
    }
}
