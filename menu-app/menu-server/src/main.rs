use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::{header, Method};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use menu_api::{router, AppState};
use menu_core::repositories::CatalogStore;
use menu_infrastructure::{create_pool, run_migrations, InMemoryCatalogStore, PgCatalogStore};
use menu_shared::config::{AppConfig, StoreBackend};
use menu_shared::utils::mask_url_credentials;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env is read here too)
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize telemetry
    menu_shared::telemetry::init_telemetry(&config.log)?;

    info!(
        "{} starting (env: {}, delete policy: {})",
        config.app.name,
        config.app.env,
        config.catalog.delete_policy.as_str()
    );

    // Catalog store
    let store: Arc<dyn CatalogStore> = match config.store.backend {
        StoreBackend::Postgres => {
            info!(
                "Connecting to database at {}...",
                mask_url_credentials(&config.database.url)
            );
            let pool = create_pool(&config.database)
                .await
                .context("Failed to connect to database")?;
            info!("Database connection established.");

            if config.database.run_migrations {
                run_migrations(&pool).await?;
            }
            Arc::new(PgCatalogStore::new(
                pool,
                Duration::from_secs(config.store.request_timeout_secs),
            ))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory catalog store; data is lost on restart");
            Arc::new(InMemoryCatalogStore::new())
        }
    };

    // Build router
    let state = AppState::new(store, config.catalog.delete_policy);
    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
