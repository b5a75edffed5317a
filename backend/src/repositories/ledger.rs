//! Ledger appends
//!
//! Each entry kind has its own table. Rows are only ever inserted here.

use shared::{NewAdjustment, NewLedgerEntry, NewPriceChange, NewRestock, NewReturn, NewSale};
use sqlx::{Postgres, Transaction};

use crate::error::AppResult;

type Tx = Transaction<'static, Postgres>;

pub(crate) async fn append_entry(tx: &mut Tx, entry: &NewLedgerEntry) -> AppResult<()> {
    match entry {
        NewLedgerEntry::Sale(sale) => append_sale(tx, sale).await,
        NewLedgerEntry::Restock(restock) => append_restock(tx, restock).await,
        NewLedgerEntry::Return(ret) => append_return(tx, ret).await,
        NewLedgerEntry::Adjustment(adjustment) => append_adjustment(tx, adjustment).await,
        NewLedgerEntry::PriceChange(change) => append_price_change(tx, change).await,
    }
}

async fn append_sale(tx: &mut Tx, sale: &NewSale) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO sales (product_id, store_id, quantity, total_price, sold_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(sale.product_id)
    .bind(sale.store_id)
    .bind(sale.quantity)
    .bind(sale.total_price)
    .bind(sale.sold_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn append_restock(tx: &mut Tx, restock: &NewRestock) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO restocks (product_id, store_id, quantity, supplier, restocked_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(restock.product_id)
    .bind(restock.store_id)
    .bind(restock.quantity)
    .bind(&restock.supplier)
    .bind(restock.restocked_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn append_return(tx: &mut Tx, ret: &NewReturn) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO returns (product_id, store_id, quantity, reason, returned_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(ret.product_id)
    .bind(ret.store_id)
    .bind(ret.quantity)
    .bind(&ret.reason)
    .bind(ret.returned_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn append_adjustment(tx: &mut Tx, adjustment: &NewAdjustment) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO adjustments (product_id, store_id, quantity, reason, adjusted_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(adjustment.product_id)
    .bind(adjustment.store_id)
    .bind(adjustment.quantity)
    .bind(&adjustment.reason)
    .bind(adjustment.adjusted_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn append_price_change(tx: &mut Tx, change: &NewPriceChange) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO price_changes (product_id, store_id, old_price, new_price, reason, changed_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(change.product_id)
    .bind(change.store_id)
    .bind(change.old_price)
    .bind(change.new_price)
    .bind(&change.reason)
    .bind(change.changed_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
