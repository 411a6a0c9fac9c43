use crate::ShutdownGuard;

use tokio::sync::broadcast;

/// Fans one shutdown signal out to every live connection task.
///
/// Cloning is cheap; every clone feeds the same broadcast channel.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self { shutdown_tx }
    }

    /// Fresh receiver on the shutdown broadcast.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal every subscriber. A send with no listeners is fine.
    pub fn shutdown(&self) {
        log::info!(
            "Shutdown requested, notifying {} subscriber(s)",
            self.shutdown_tx.receiver_count()
        );
        let _ = self.shutdown_tx.send(());
    }

    /// Guard wrapping a fresh subscription, for use in spawned tasks.
    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self)
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
