use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use oil_routes::config::environment::EnvironmentConfig;
use oil_routes::database::DatabaseConnection;
use oil_routes::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🛢️  Waste oil route service");

    let config = EnvironmentConfig::from_env()?;
    info!("Environment: {}", config.environment);

    let db_connection = DatabaseConnection::connect(&config.database).await?;
    db_connection.run_migrations().await?;
    let pool = db_connection.pool().clone();

    if config.is_production() && config.cors_origins.is_empty() {
        warn!("CORS_ORIGINS is empty, every origin will be allowed");
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(pool, config));

    info!("🌐 Listening on http://{}", addr);
    info!("🚚 Driver endpoints:");
    info!("   GET  /api/stops/?vehicle_id=<id> - Today's stops for a vehicle");
    info!("   GET  /api/today-stops/?vehicle_id=<id> - Same as above");
    info!("   GET  /api/stops/:id/ - Stop detail");
    info!("   POST /api/stops/:id/collection/ - Submit a collection");
    info!("   POST /api/stops/:id/submit-collection/ - Same as above");
    info!("   POST /api/stops/:id/failure/ - Report a failed stop");
    info!("🔐 Auth endpoints:");
    info!("   POST /api/auth/login - Obtain a bearer token");
    info!("   GET  /api/auth/me - Current user");
    info!("🗂️  Planner endpoints (staff token required):");
    info!("   /api/admin/customers, /api/admin/sites, /api/admin/vehicles");
    info!("   /api/admin/route-definitions, /api/admin/routes, /api/admin/stops");
    info!("   /api/admin/collections, /api/admin/users");
    info!("   GET  /health - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Server error: {}", e);
        return Err(e.into());
    }

    info!("👋 Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Could not listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Could not listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Termination signal received, shutting down...");
        },
    }
}
