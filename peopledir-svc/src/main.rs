//! peopledir-svc - Person directory service entry point

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use peopledir_common::db::init_database;
use peopledir_svc::cli::Args;
use peopledir_svc::db::SqliteUserStore;
use peopledir_svc::inference::HttpUserApi;
use peopledir_svc::service::UserService;
use peopledir_svc::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Args::parse()
        .into_settings()
        .context("Failed to load settings")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting peopledir-svc v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Database path: {}", settings.database_path.display());

    let pool = init_database(&settings.database_path, settings.db_max_connections)
        .await
        .context("Failed to initialize database")?;
    info!(
        max_connections = settings.db_max_connections,
        "Connected to database"
    );

    let api = HttpUserApi::new(&settings.api).context("Failed to build HTTP client")?;
    let store = SqliteUserStore::new(pool);
    let service = UserService::new(Arc::new(api), Arc::new(store));

    let app = build_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", settings.bind_addr))?;
    info!("peopledir-svc listening on http://{}", settings.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
