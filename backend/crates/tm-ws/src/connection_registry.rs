use crate::{
    ConnectionConfig, ConnectionId, ConnectionInfo, ConnectionLimits, Result as WsErrorResult,
    WsError,
};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use error_location::ErrorLocation;
use log::{debug, info, warn};
use tokio::sync::{RwLock, mpsc};

/// Registry for tracking active WebSocket connections
pub struct ConnectionRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    limits: ConnectionLimits,
    config: ConnectionConfig,
}

struct RegistryInner {
    /// All active connections by connection_id
    connections: HashMap<ConnectionId, ConnectionInfo>,
}

impl ConnectionRegistry {
    pub fn new(limits: ConnectionLimits, config: ConnectionConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                connections: HashMap::new(),
            })),
            limits,
            config,
        }
    }

    /// Register a new connection, returns ConnectionId if successful
    pub async fn register(
        &self,
        client_label: String,
        sender: mpsc::Sender<Message>,
    ) -> WsErrorResult<ConnectionId> {
        let mut inner = self.inner.write().await;

        // Check total connection limit
        if inner.connections.len() >= self.limits.max_total {
            warn!(
                "Total connection limit reached: {}/{}",
                inner.connections.len(),
                self.limits.max_total
            );
            return Err(WsError::ConnectionLimitExceeded {
                current: inner.connections.len(),
                max: self.limits.max_total,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // Create new connection
        let connection_id = ConnectionId::new();
        let info = ConnectionInfo {
            connection_id,
            client_label,
            connected_at: chrono::Utc::now(),
            sender,
        };

        inner.connections.insert(connection_id, info);
        info!(
            "Registered connection {connection_id} ({} total)",
            inner.connections.len()
        );

        Ok(connection_id)
    }

    /// Unregister a connection
    pub async fn unregister(&self, connection_id: ConnectionId) {
        let mut inner = self.inner.write().await;

        if inner.connections.remove(&connection_id).is_some() {
            info!(
                "Unregistered connection {connection_id} ({} total remaining)",
                inner.connections.len()
            );
        }
    }

    /// Get information about a specific connection
    pub async fn get(&self, connection_id: ConnectionId) -> Option<ConnectionInfo> {
        let inner = self.inner.read().await;
        inner.connections.get(&connection_id).cloned()
    }

    /// Get total connection count
    pub async fn total_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.connections.len()
    }

    /// Send a text message to every registered connection.
    ///
    /// Snapshots the connection list under the read lock, then writes
    /// outside the lock so a slow client cannot block registration.
    /// Connections that fail or time out are removed from the registry.
    /// Returns the number of connections the message was delivered to.
    pub async fn broadcast(&self, text: &str) -> usize {
        let targets: Vec<(ConnectionId, mpsc::Sender<Message>)> = {
            let inner = self.inner.read().await;
            inner
                .connections
                .values()
                .map(|info| (info.connection_id, info.sender.clone()))
                .collect()
        };

        if targets.is_empty() {
            return 0;
        }

        let write_timeout = Duration::from_millis(self.config.write_timeout_ms);
        let mut delivered = 0;
        let mut failed: Vec<ConnectionId> = Vec::new();

        for (connection_id, sender) in targets {
            let send = sender.send(Message::Text(text.to_string().into()));
            match tokio::time::timeout(write_timeout, send).await {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(_)) => {
                    warn!("Connection {connection_id} closed during broadcast, removing");
                    failed.push(connection_id);
                }
                Err(_) => {
                    warn!(
                        "Broadcast write to connection {connection_id} timed out after {}ms, removing",
                        self.config.write_timeout_ms
                    );
                    failed.push(connection_id);
                }
            }
        }

        if !failed.is_empty() {
            let mut inner = self.inner.write().await;
            for connection_id in failed {
                inner.connections.remove(&connection_id);
            }
            debug!("{} connections remaining after broadcast", inner.connections.len());
        }

        delivered
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            limits: self.limits.clone(),
            config: self.config.clone(),
        }
    }
}
