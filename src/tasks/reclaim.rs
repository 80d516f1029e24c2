//! Reclamation Task
//!
//! Background task that periodically sweeps expired entries out of the
//! cache and the backing record store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::CacheInner;

/// Shortest accepted sweep interval
const MIN_INTERVAL: Duration = Duration::from_millis(1);

// == Reclamation Handle ==
/// Owner's handle on a running reclamation task.
///
/// Dropping the handle closes the shutdown channel, so the task exits after
/// finishing any sweep in progress.
#[derive(Debug)]
pub struct ReclamationHandle {
    shutdown: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl ReclamationHandle {
    /// Signals the task to stop and waits for it to exit.
    ///
    /// Calling this more than once is harmless.
    pub async fn shutdown(&self) {
        // The receiver is gone only if the task already exited.
        let _ = self.shutdown.send(true);

        if let Some(handle) = self.handle.lock().await.take() {
            if let Err(err) = handle.await {
                warn!(error = %err, "Reclamation task ended abnormally");
            }
        }
    }

    /// Returns true while the task is running.
    pub fn is_running(&self) -> bool {
        match self.handle.try_lock() {
            Ok(handle) => handle.as_ref().is_some_and(|h| !h.is_finished()),
            // Held only by a shutdown in progress
            Err(_) => true,
        }
    }
}

/// Spawns the task that sweeps expired entries every `interval`.
///
/// The first sweep happens one full interval after spawning. Each sweep is
/// delegated to the cache, which also reports record store failures; they
/// never stop the loop.
///
/// # Arguments
/// * `cache` - Shared cache state to sweep
/// * `interval` - Time between sweeps
pub(crate) fn spawn_reclamation_task(
    cache: Arc<CacheInner>,
    interval: Duration,
) -> ReclamationHandle {
    let interval = interval.max(MIN_INTERVAL);
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        info!("Starting reclamation task with interval of {:?}", interval);

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                // Fires on an explicit shutdown and when the handle is dropped
                _ = shutdown_rx.changed() => break,
            }

            cache.reclaim_expired().await;
        }

        info!("Reclamation task stopped");
    });

    ReclamationHandle {
        shutdown: shutdown_tx,
        handle: Mutex::new(Some(handle)),
    }
}
