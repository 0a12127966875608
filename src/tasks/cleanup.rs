//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::{mpsc, Weak};
use std::thread;
use std::time::Duration;

use tokio::runtime::Builder;
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::{CacheError, Result};

// == Sweep Target ==
/// Something the cleaner can sweep.
///
/// Implementors take their own lock for the duration of one sweep and
/// return the number of entries removed.
pub trait Sweep: Send + Sync + 'static {
    fn sweep(&self) -> usize;
}

// == Cleaner ==
/// Owned handle to a background TTL cleanup task.
///
/// The task runs on its own thread with a private current-thread tokio
/// runtime, so it needs no runtime from the caller and outlives none. It
/// stops when this handle is dropped or [`Cleaner::stop`] is called, and
/// exits on its own once the swept target has been dropped.
#[derive(Debug)]
pub struct Cleaner {
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Cleaner {
    /// Spawns a cleanup thread sweeping `target` every `interval`.
    ///
    /// The first sweep runs one `interval` after spawning. Shutdown is only
    /// observed between sweeps, so a sweep in progress always completes.
    ///
    /// # Errors
    /// Returns `InvalidInterval` for a zero interval and `CleanerSpawn` when
    /// the OS refuses to create the runtime or thread.
    pub fn spawn<S: Sweep>(target: Weak<S>, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(CacheError::InvalidInterval);
        }

        let (shutdown, shutdown_rx) = oneshot::channel();
        let (ready_tx, ready_rx) = mpsc::channel();

        // The runtime is built and dropped on the cleaner thread only
        let thread = thread::Builder::new()
            .name("ttl-cleaner".to_string())
            .spawn(move || {
                let runtime = match Builder::new_current_thread().enable_time().build() {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        let _ = ready_tx.send(Err(err.to_string()));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));
                runtime.block_on(run_cleanup(target, interval, shutdown_rx));
            })
            .map_err(|err| CacheError::CleanerSpawn(err.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(reason)) => {
                let _ = thread.join();
                return Err(CacheError::CleanerSpawn(reason));
            }
            Err(_) => {
                let _ = thread.join();
                return Err(CacheError::CleanerSpawn(
                    "cleanup thread exited during startup".to_string(),
                ));
            }
        }

        Ok(Self {
            shutdown: Some(shutdown),
            thread: Some(thread),
        })
    }

    /// Returns true while the background thread is alive.
    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .map_or(false, |thread| !thread.is_finished())
    }

    /// Stops the task and waits for its thread to exit.
    pub fn stop(mut self) {
        self.shutdown_and_join();
    }

    fn shutdown_and_join(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // The task may already have exited after its target was dropped
            let _ = shutdown.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("TTL cleanup thread panicked");
            }
        }
    }
}

impl Drop for Cleaner {
    fn drop(&mut self) {
        self.shutdown_and_join();
    }
}

async fn run_cleanup<S: Sweep>(
    target: Weak<S>,
    interval: Duration,
    mut shutdown: oneshot::Receiver<()>,
) {
    info!(?interval, "Starting TTL cleanup task");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => {
                debug!("TTL cleanup task stopped");
                break;
            }
        }

        let Some(live) = target.upgrade() else {
            debug!("Cache dropped, stopping TTL cleanup task");
            break;
        };
        let removed = live.sweep();
        drop(live);

        // Log cleanup statistics
        if removed > 0 {
            info!("TTL cleanup: removed {} expired entries", removed);
        } else {
            debug!("TTL cleanup: no expired entries found");
        }
    }
}
