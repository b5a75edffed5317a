//! HTTP handlers for product edits and stock monitoring

use axum::{
    extract::{Path, Query, State},
    Json,
};
use shared::{EditProductInput, Product, Scope, StockItem};

use crate::error::AppResult;
use crate::services::ProductEdit;
use crate::AppState;

/// Get a product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<Product>> {
    let product = state.inventory.get_product(product_id).await?;
    Ok(Json(product))
}

/// Edit a product and record the matching ledger entries
pub async fn edit_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    Json(input): Json<EditProductInput>,
) -> AppResult<Json<ProductEdit>> {
    let edit = state.inventory.edit_product(product_id, input).await?;
    Ok(Json(edit))
}

/// Stock levels narrowed by optional product, store and store chain
pub async fn list_stock(
    State(state): State<AppState>,
    Query(scope): Query<Scope>,
) -> AppResult<Json<Vec<StockItem>>> {
    let stock = state.inventory.list_stock(&scope).await?;
    Ok(Json(stock))
}
