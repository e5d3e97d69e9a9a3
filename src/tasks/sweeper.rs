//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired entries from one store.
//! Each store owns at most one sweeper, and the task stops when its
//! [`Sweeper`] handle is shut down or dropped.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::TtlCache;
use crate::error::Result;

/// Handle to a running sweep task.
#[derive(Debug)]
pub struct Sweeper {
    label: &'static str,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    /// Signals the task to stop and waits for it to exit.
    pub async fn shutdown(self) {
        let Sweeper {
            label,
            shutdown,
            handle,
        } = self;

        // The task may already be gone if it panicked; nothing to signal then.
        let _ = shutdown.send(());

        if let Err(err) = handle.await {
            warn!(store = label, error = %err, "sweeper exited abnormally");
        } else {
            info!(store = label, "sweeper stopped");
        }
    }
}

/// Spawns the sweep task for `cache`.
///
/// The task sleeps for `interval` between runs and takes the write lock for
/// each sweep. Fails with [`ApiError::SweeperRunning`](crate::error::ApiError)
/// if the store already has a sweeper.
pub fn spawn_sweeper<V>(
    cache: TtlCache<V>,
    interval: Duration,
    label: &'static str,
) -> Result<Sweeper>
where
    V: Clone + Send + Sync + 'static,
{
    cache.claim_sweeper(label)?;

    let (shutdown, mut shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        info!(
            store = label,
            "Starting expiry sweeper with interval of {:?}", interval
        );

        loop {
            // Resolves on an explicit shutdown or when the handle is dropped.
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = tokio::time::sleep(interval) => {}
            }

            let removed = cache.sweep_expired().await;

            if removed > 0 {
                info!(store = label, "Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!(store = label, "Expiry sweep: no expired entries found");
            }
        }
    });

    Ok(Sweeper {
        label,
        shutdown,
        handle,
    })
}
