//! Retail inventory backend
//!
//! Keeps product state and the inventory ledger consistent on every edit, and
//! watches stock levels against threshold alerts on a fixed interval.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod repositories;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult, NotificationError};

use repositories::{AlertRepository, InventoryStore, PgAlertRepository, PgProductRepository, ProductRepository};
use services::{
    AlertEvaluator, AlertService, InventoryService, NotificationDispatcher, NotificationSender,
    ReportingService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    pub inventory: InventoryService,
    pub alerts: AlertService,
    pub evaluator: AlertEvaluator,
    pub reporting: ReportingService,
}

/// Repositories and transport the services are built from
pub struct Collaborators {
    pub products: Arc<dyn ProductRepository>,
    pub store: Arc<dyn InventoryStore>,
    pub alerts: Arc<dyn AlertRepository>,
    pub sender: Arc<dyn NotificationSender>,
}

impl Collaborators {
    /// PostgreSQL-backed repositories sharing one pool
    pub fn postgres(db: &sqlx::PgPool, sender: Arc<dyn NotificationSender>) -> Self {
        let products = Arc::new(PgProductRepository::new(db.clone()));
        Self {
            products: products.clone(),
            store: products,
            alerts: Arc::new(PgAlertRepository::new(db.clone())),
            sender,
        }
    }
}

impl AppState {
    pub fn new(db: sqlx::PgPool, config: Config, collaborators: Collaborators) -> Self {
        let dispatcher = NotificationDispatcher::from_config(collaborators.sender, &config.alerts);

        Self {
            inventory: InventoryService::new(collaborators.products, collaborators.store),
            alerts: AlertService::new(collaborators.alerts.clone(), dispatcher.clone()),
            evaluator: AlertEvaluator::new(collaborators.alerts, dispatcher),
            reporting: ReportingService::new(db.clone()),
            config: Arc::new(config),
            db,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Retail Inventory API v1.0"
}
