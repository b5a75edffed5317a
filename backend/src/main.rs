//! Retail inventory backend server

use std::time::Duration;

use retail_inventory::{
    create_app,
    services::{sender_from_config, AlertScheduler},
    AppState, Collaborators, Config,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "retail_inventory=debug,inventory_server=debug,tower_http=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Retail Inventory Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    if let Err(reason) = shared::validate_email(&config.alerts.operations_contact) {
        tracing::warn!(
            contact = %config.alerts.operations_contact,
            "Operations contact looks wrong: {}",
            reason
        );
    }
    if config.mail.endpoint.is_none() {
        tracing::warn!("No mail relay configured; stock alerts will only be logged");
    }
    let sender = sender_from_config(&config.mail);
    let collaborators = Collaborators::postgres(&db_pool, sender);

    let addr = config.bind_address();
    let alerts_config = config.alerts.clone();
    let state = AppState::new(db_pool, config, collaborators);

    // Start the alert scheduler
    let scheduler = if alerts_config.enabled {
        let scheduler = AlertScheduler::new(state.evaluator.clone(), alerts_config.evaluation_interval());
        Some(scheduler.start())
    } else {
        tracing::info!("Alert scheduler disabled");
        None
    };

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
