use anyhow::Result;
use std::time::Duration;
use tracing::info;

mod app;
mod config;
mod error;
mod jobs;
mod middleware;
mod routes;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging and metrics
    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics();

    info!("Starting Sponsor Manager API v{}", env!("CARGO_PKG_VERSION"));

    // Create database pool
    let pool = persistence::db::create_pool(&config.database_config()).await?;

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    // Start background jobs (invitation runner + reminder sweep)
    let scheduler = jobs::start_background_jobs(&config, pool.clone());

    // Build application
    let app = app::create_app(config.clone(), pool);

    // Start server
    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Drain background jobs before exit
    if let Some(scheduler) = scheduler {
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(10)).await;
    }

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Shutdown signal received");
}
