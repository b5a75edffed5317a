//! Route definitions for the retail inventory backend

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/products", product_routes())
        .route("/stock", get(handlers::list_stock))
        .nest("/alerts", alert_routes())
        .nest("/reports", report_routes())
}

/// Product routes
fn product_routes() -> Router<AppState> {
    Router::new().route(
        "/:product_id",
        get(handlers::get_product).put(handlers::edit_product),
    )
}

/// Alert routes
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_alert))
        .route("/active", get(handlers::list_active_alerts))
        .route("/history", get(handlers::list_alert_history))
        .route("/evaluate", post(handlers::evaluate_alerts))
        .route("/:alert_id/active", put(handlers::set_alert_active))
}

/// Reporting routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/ledger/:kind", get(handlers::get_ledger_report))
        .route("/revenue-trend", get(handlers::get_revenue_trend))
        .route("/return-rates", get(handlers::get_return_rates))
        .route("/price-change-impact", get(handlers::get_price_change_impact))
        .route("/low-stock", get(handlers::get_low_stock_alerts))
}
