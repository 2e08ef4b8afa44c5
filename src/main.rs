use std::sync::Arc;

use dex_trades_service::{api, config::Config, db::connection, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting dex-trades-service");

    // Load configuration
    let config = Config::from_env();
    tracing::info!("Configuration loaded: {:?}", config);

    // Setup database connection; a failure here is fatal.
    let db_pool = connection::establish_connection(&config.database_url).await?;
    tracing::info!("Database connection established");

    // Create shared state
    let app_state = Arc::new(AppState {
        config: config.clone(),
        db_pool,
    });

    // Start HTTP server
    let app = api::create_router(app_state);
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
