//! Background task management
//!
//! Registration and graceful shutdown for the server's long-running tasks.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct RegisteredTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

/// Holds every spawned background task together with a shared cancellation
/// token; [`BackgroundTasks::shutdown`] cancels and awaits them all.
pub struct BackgroundTasks {
    tasks: Vec<RegisteredTask>,
    shutdown: CancellationToken,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Spawn a periodic task that runs `tick` every `interval` until shutdown.
    pub fn spawn_periodic<F, Fut>(&mut self, name: &'static str, interval: Duration, tick: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send,
    {
        let token = self.shutdown.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so startup stays quiet.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        // A panicking tick must not kill the task for good
                        if AssertUnwindSafe(tick()).catch_unwind().await.is_err() {
                            tracing::error!(task = name, "Background task tick panicked");
                        }
                    }
                }
            }
            tracing::debug!(task = name, "Background task stopped");
        });
        self.tasks.push(RegisteredTask { name, handle });
        tracing::info!(task = name, interval_secs = interval.as_secs(), "Background task started");
    }

    /// Cancel every task and wait for them to finish.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        for task in self.tasks {
            if let Err(e) = task.handle.await {
                tracing::warn!(task = task.name, error = %e, "Background task join failed");
            }
        }
    }
}

impl Default for BackgroundTasks {
    fn default() -> Self {
        Self::new()
    }
}
