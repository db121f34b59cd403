//! Transcript Cache - HTTP server entry point
//!
//! Wires configuration, the cache backend and the YouTube provider into
//! the Axum router.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transcript_cache::transcript::FALLBACK_TABLE_VERSION;
use transcript_cache::{create_router, spawn_cleanup_task, AppState, Config};

/// Main entry point for the transcript server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the cache backend (Redis when `REDIS_URL` is set, memory otherwise)
/// 4. Start the expiry sweep for the memory backend
/// 5. Create Axum router with all endpoints
/// 6. Serve until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transcript_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting YouTube Transcript API");

    let config = Config::from_env();
    let backend = if config.redis_url.is_some() {
        "redis"
    } else {
        "memory"
    };
    info!(
        backend,
        cache_ttl = config.cache_ttl,
        namespace = %config.cache_namespace,
        default_language = ?config.default_language,
        port = config.server_port,
        language_fallback_version = FALLBACK_TABLE_VERSION,
        "Configuration loaded"
    );

    let (state, memory) =
        AppState::from_config(&config).context("failed to initialize the cache backend")?;

    let cleanup_handle = memory.map(|backend| {
        info!("Background expiry sweep started");
        spawn_cleanup_task(backend, std::time::Duration::from_secs(config.cleanup_interval))
    });

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.server_port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.server_port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the expiry sweep and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
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
                warn!(error = %err, "Failed to install SIGTERM handler");
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Expiry sweep aborted");
    }
}
