// File: services/roombook_backend/src/main.rs
use std::sync::Arc;

use roombook_backend::{build_router, AppState};
use roombook_common::{logging, Context, RoombookError};
use roombook_config::load_config;
use roombook_db::DbClientFactory;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(err) = run().await {
        logging::log_error(err, "room booking server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), RoombookError> {
    let config = Arc::new(
        load_config().map_err(|err| RoombookError::ConfigError(err.to_string()))?,
    );

    let db = logging::log_result(
        DbClientFactory::new().from_app_config(&config).await,
        "Database ready",
        "Database setup failed",
    )?;

    let state = AppState::new(config.clone(), db)?;
    let app = build_router(&state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
