//! # CLI Server
//!
//! Server startup for the Vitalog CLI: connect, migrate, seed, serve.

use std::{net::SocketAddr, sync::Arc};

use anyhow::anyhow;
use auth::JwtConfig;
use error::Result;
use migration::{AdminSeedConfig, AdminSeedGuard, Migrator, MigratorTrait as _, SeaAccountStore};
use ::server::{AppState, create_app_router, middleware::security_headers::CorsConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::{DatabaseConfig, parse_socket_addr, timezone_from_env};

/// Starts the API server
///
/// # Arguments
///
/// * `config` - Database configuration
/// * `args` - Serve command arguments
///
/// # Returns
///
/// A `Result` indicating success or failure.
pub async fn serve(config: &DatabaseConfig, args: &crate::commands::ServeArgs) -> Result<()> {
    info!(target: "serve", "Starting API server...");

    let jwt_config = JwtConfig::from_env()?;
    let tz = timezone_from_env()?;
    let cors = CorsConfig::from_env();

    let database_url = crate::config::build_database_url(config);

    info!(target: "serve", host = %config.host, database = %config.database, "Connecting to database...");
    let db = Arc::new(
        migration::connect_to_database(&database_url)
            .await
            .map_err(|e| anyhow!("Failed to connect to database: {}", e))?,
    );

    info!(target: "serve", "Running database migrations...");
    Migrator::up(&*db, None)
        .await
        .map_err(|e| anyhow!("Failed to run database migrations: {}", e))?;
    info!(target: "serve", "Database migrations completed successfully");

    let seed_guard = AdminSeedGuard::new(SeaAccountStore::new(Arc::clone(&db)), AdminSeedConfig::from_env());
    match seed_guard.ensure_seeded().await {
        Ok(outcome) => info!(target: "serve", ?outcome, "Admin seed finished"),
        // Login retries the seed, so a failure here does not stop the server
        Err(e) => warn!(target: "serve", error = %e, "Admin seed failed"),
    }

    let state = AppState::new(db, jwt_config, seed_guard, tz);
    let app = create_app_router(state, cors);

    let address = parse_socket_addr(&args.host, args.port)
        .map_err(|e| anyhow!("Invalid address {}:{}: {}", args.host, args.port, e))?;

    serve_http(app, address).await
}

async fn serve_http(app: axum::Router, address: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| anyhow!("Failed to bind to {}: {}", address, e))?;

    info!(target: "serve", %address, "Starting HTTP server...");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| anyhow!("HTTP server error: {}", e))?;

    info!(target: "serve", "Server stopped");
    Ok(())
}

/// Waits for shutdown signals (Ctrl+C or SIGTERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(target: "serve", error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(target: "serve", error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!(target: "serve", "Shutdown signal received");
}
