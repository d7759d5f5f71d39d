use std::sync::Arc;
use std::time::Duration;

use sea_orm::Database;
use tokio::sync::watch;
use tracing::info;

use shelfmark_core::clock::SystemClock;
use shelfmark_core::tracing::init_tracing;
use shelfmark_library::config::LibraryConfig;
use shelfmark_library::router::build_router;
use shelfmark_library::state::AppState;
use shelfmark_library::sweep;
use shelfmark_library_migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = LibraryConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("failed to apply database migrations");

    let state = AppState {
        db: db.clone(),
        clock: Arc::new(SystemClock),
    };

    // Overdue sweep
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = sweep::spawn(
        state.clone(),
        Duration::from_secs(config.sweep_interval_secs),
        shutdown_rx,
    );

    // HTTP server
    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.library_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("library service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    let _ = shutdown_tx.send(true);
    if let Err(e) = sweeper.await {
        tracing::warn!(error = %e, "overdue sweep task ended abnormally");
    }
    if let Err(e) = db.close().await {
        tracing::warn!(error = %e, "failed to close database connection");
    }
    info!("library service stopped");
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
