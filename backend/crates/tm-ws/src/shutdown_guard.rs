use crate::ShutdownCoordinator;

use tokio::sync::broadcast;

/// Per-task handle on the shutdown broadcast.
pub struct ShutdownGuard {
    shutdown_rx: broadcast::Receiver<()>,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            shutdown_rx: coordinator.subscribe(),
        }
    }

    /// Resolves once shutdown is signalled. A lagged or closed channel
    /// counts as signalled.
    pub async fn wait(&mut self) {
        let _ = self.shutdown_rx.recv().await;
    }
}
