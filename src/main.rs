//! Fib Cursor - A Fibonacci cursor server
//!
//! Serves next/current/previous over the Fibonacci sequence from a bounded LRU
//! cache, recomputing evicted values on demand, and checkpoints the cursor to disk.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fib_cursor::api::create_router;
use fib_cursor::{spawn_backup_task, AppState, BackupFile, Config};

/// Main entry point for the Fibonacci cursor server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Recover the last checkpointed cursor index
/// 4. Rebuild the cache up to that index
/// 5. Start background backup task
/// 6. Start HTTP server on configured port
/// 7. On SIGINT/SIGTERM, drain requests, then signal the backup task to write
///    a final checkpoint and wait for it
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fib_cursor=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Fibonacci cursor server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_capacity={}, port={}, backup_path={}, backup_interval={}s",
        config.cache_capacity,
        config.server_port,
        config.backup_path.display(),
        config.backup_interval
    );

    let backup = BackupFile::new(config.backup_path.clone());
    let index = backup.recover_index();

    let state = AppState::from_config(&config, index)
        .with_context(|| format!("failed to initialize sequence at index {}", index))?;
    info!("Sequence store initialized at index {}", index);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let backup_handle = spawn_backup_task(
        state.store.clone(),
        backup,
        config.backup_interval,
        shutdown_rx,
    );
    info!("Background backup task started");

    let app = create_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // Let the backup task finish its last write instead of cutting it off
    let _ = shutdown_tx.send(true);
    if let Err(err) = backup_handle.await {
        warn!("Backup task ended abnormally: {}", err);
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// Returning lets axum drain in-flight requests before `main` stops the backup task.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
