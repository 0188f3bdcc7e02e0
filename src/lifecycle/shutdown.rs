//! Shutdown coordination.
//!
//! A `watch` channel rather than a broadcast: a task that subscribes after
//! shutdown was triggered still sees it, so a signal arriving during startup
//! is never lost.

use tokio::sync::watch;

/// Owner side: triggers shutdown once, for every subscriber.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Task side: resolves once shutdown has been triggered.
#[derive(Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Trigger shutdown. Later calls are no-ops.
    pub fn trigger(&self, reason: &str) {
        if !self.tx.send_replace(true) {
            tracing::info!(reason, "Shutdown triggered");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Wait for shutdown. Also resolves if the owning [`Shutdown`] is
    /// dropped, since nothing can trigger it any more.
    pub async fn recv(mut self) {
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }
}
