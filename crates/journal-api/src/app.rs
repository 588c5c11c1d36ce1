//! Listener startup: binds a router to its address and serves it until a
//! shutdown signal arrives.

use axum::Router;
use tokio::net::TcpListener;

use journal_core::error::AppError;
use journal_core::result::AppResult;

use crate::router::{dashboard_router, ingest_router};
use crate::state::AppState;

/// Builds the dashboard application.
pub fn build_dashboard_app(state: AppState) -> Router {
    dashboard_router(state)
}

/// Builds the upload application.
pub fn build_ingest_app(state: AppState) -> Router {
    ingest_router(state)
}

/// Binds `host:port` and serves `app` with graceful shutdown.
pub async fn serve(name: &'static str, app: Router, host: &str, port: u16) -> AppResult<()> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(listener = name, "Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("{name} server error: {e}")))?;

    tracing::info!(listener = name, "Listener stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
