//! HTTP server initialization and runtime setup.
//!
//! Handles upstream client construction, cache setup, sweeper spawning, and
//! Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::cache::{CacheService, InMemoryCache, NullCache, run_cache_sweeper};
use crate::infrastructure::geocoding::NominatimClient;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Nominatim HTTP client
/// - In-memory cache (or NullCache when disabled)
/// - Background cache sweeper
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The upstream client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let http_client =
        NominatimClient::http_client(&config.upstream_user_agent, config.upstream_timeout())
            .context("Failed to build upstream HTTP client")?;
    let provider = Arc::new(
        NominatimClient::new(http_client, &config.nominatim_base_url)
            .context("Invalid NOMINATIM_BASE_URL")?,
    );
    tracing::info!("Upstream: {}", config.nominatim_base_url);

    let cache: Arc<dyn CacheService> = if config.cache_enabled {
        tracing::info!("Cache enabled (in-memory)");
        Arc::new(InMemoryCache::new(
            config.cache_ttl(),
            config.cache_max_entries,
        ))
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    if config.cache_enabled {
        tokio::spawn(run_cache_sweeper(
            cache.clone(),
            config.cache_sweep_interval(),
        ));
        tracing::info!("Cache sweeper started");
    }

    let state = AppState::new(provider, cache);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
