//! PostgreSQL product repository and edit transactions

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{NewLedgerEntry, Product, ProductFields, Scope, StockItem};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use super::{ledger, EditTransaction, InventoryStore, ProductRepository};
use crate::error::{AppError, AppResult};

/// Placeholder shown in the stock view when a store or chain is missing
const UNRESOLVED: &str = "-";

#[derive(Clone)]
pub struct PgProductRepository {
    db: PgPool,
}

#[derive(Debug, FromRow)]
pub(crate) struct ProductRow {
    id: i32,
    name: String,
    category: String,
    description: String,
    price: Decimal,
    quantity: i32,
    store_id: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            description: row.description,
            price: row.price,
            quantity: row.quantity,
            store_id: row.store_id,
        }
    }
}

#[derive(Debug, FromRow)]
struct StockRow {
    id: i32,
    product_name: String,
    category: String,
    quantity: i32,
    price: Decimal,
    store_name: Option<String>,
    store_chain_name: Option<String>,
}

impl From<StockRow> for StockItem {
    fn from(row: StockRow) -> Self {
        Self {
            id: row.id,
            product_name: row.product_name,
            category: row.category,
            quantity: row.quantity,
            price: row.price,
            store_name: row.store_name.unwrap_or_else(|| UNRESOLVED.to_string()),
            store_chain_name: row.store_chain_name.unwrap_or_else(|| UNRESOLVED.to_string()),
        }
    }
}

impl PgProductRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

pub(crate) async fn fetch_product(db: &PgPool, id: i32) -> AppResult<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT id, name, category, description, price, quantity, store_id
        FROM products
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row.map(Into::into))
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        fetch_product(&self.db, id).await
    }

    async fn list_stock(&self, scope: &Scope) -> AppResult<Vec<StockItem>> {
        let rows = sqlx::query_as::<_, StockRow>(
            r#"
            SELECT p.id, p.name AS product_name, p.category, p.quantity, p.price,
                   s.name AS store_name, sc.name AS store_chain_name
            FROM products p
            LEFT JOIN stores s ON s.id = p.store_id
            LEFT JOIN store_chains sc ON sc.id = s.store_chain_id
            WHERE ($1::int IS NULL OR p.id = $1)
              AND ($2::int IS NULL OR p.store_id = $2)
              AND ($3::int IS NULL OR s.store_chain_id = $3)
            ORDER BY p.name, p.id
            "#,
        )
        .bind(scope.product_id)
        .bind(scope.store_id)
        .bind(scope.store_chain_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl InventoryStore for PgProductRepository {
    async fn begin(&self) -> AppResult<Box<dyn EditTransaction>> {
        let tx = self.db.begin().await?;
        Ok(Box::new(PgEditTransaction { tx }))
    }
}

/// Edit transaction over a single database transaction.
///
/// sqlx rolls the transaction back when it is dropped uncommitted.
pub struct PgEditTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl EditTransaction for PgEditTransaction {
    async fn find_product(&mut self, id: i32) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, category, description, price, quantity, store_id
            FROM products
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn append_entry(&mut self, entry: &NewLedgerEntry) -> AppResult<()> {
        ledger::append_entry(&mut self.tx, entry).await
    }

    async fn update_product(&mut self, id: i32, fields: &ProductFields) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET name = $1, category = $2, description = $3, price = $4, quantity = $5, store_id = $6
            WHERE id = $7
            RETURNING id, name, category, description, price, quantity, store_id
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.category)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.quantity)
        .bind(fields.store_id)
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
