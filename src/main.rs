//! Employee Cache - a time-expiring cache fronting an employee record store
//!
//! Lifecycle harness for the cache and its reclamation loop, not a server:
//! no transport is exposed, so nothing outside this process can reach the
//! cache. It runs against the in-memory record store until interrupted.

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use employee_cache::{CacheStore, Config, MemoryRecordStore};

/// Main entry point for the employee cache harness.
///
/// Exercises construction, background reclamation and shutdown; callers
/// embedding the cache use the library API instead.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the record store and the cache (which starts reclamation)
/// 4. Wait for SIGINT/SIGTERM
/// 5. Stop the reclamation task and report final statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "employee_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting employee cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: default_expiration={:?}, cleanup_interval={:?}, endless_lifetime={}, promotion_interval={:?}",
        config.default_expiration,
        config.cleanup_interval,
        config.endless_lifetime,
        config.promotion_interval
    );

    let records = Arc::new(MemoryRecordStore::new());
    let cache = CacheStore::new(&config, records);
    info!("Cache store initialized");

    shutdown_signal().await?;

    cache.shutdown().await;
    let stats = cache.stats().await;
    info!(
        "Shutdown complete: entries={}, hits={}, misses={}, reclaimed={}, failed_sweep_deletions={}",
        stats.total_entries, stats.hits, stats.misses, stats.reclaimed, stats.failed_sweep_deletions
    );

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("failed to install SIGTERM handler")?;

        tokio::select! {
            result = signal::ctrl_c() => {
                result.context("failed to listen for Ctrl+C")?;
                info!("Received Ctrl+C, initiating shutdown...");
            }
            _ = terminate.recv() => {
                info!("Received SIGTERM, initiating shutdown...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c()
            .await
            .context("failed to listen for Ctrl+C")?;
        info!("Received Ctrl+C, initiating shutdown...");
    }

    Ok(())
}
