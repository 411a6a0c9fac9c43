use crate::{
    ConnectionConfig, ConnectionId, ConnectionRegistry, Result as WsErrorResult, ShutdownGuard,
    WsError,
};

use std::panic::Location;

use axum::extract::ws::{CloseFrame, Message, WebSocket, close_code};
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

/// Manages a single WebSocket connection
pub struct WebSocketConnection {
    client_label: String,
    config: ConnectionConfig,
    registry: ConnectionRegistry,
}

impl WebSocketConnection {
    pub fn new(client_label: String, config: ConnectionConfig, registry: ConnectionRegistry) -> Self {
        Self {
            client_label,
            config,
            registry,
        }
    }

    /// Handle the WebSocket connection lifecycle
    pub async fn handle(
        self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        // Split socket into sender and receiver
        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Create bounded channel for outgoing messages (backpressure handling)
        let (tx, mut rx) = mpsc::channel::<Message>(self.config.send_buffer_size);

        let connection_id = match self
            .registry
            .register(self.client_label.clone(), tx.clone())
            .await
        {
            Ok(connection_id) => connection_id,
            Err(e) => {
                let _ = ws_sender
                    .send(Message::Close(Some(CloseFrame {
                        code: close_code::AGAIN,
                        reason: "Connection limit reached".into(),
                    })))
                    .await;
                return Err(e);
            }
        };

        log::info!(
            "WebSocket connection {} established for client {}",
            connection_id,
            self.client_label
        );

        // Spawn send task
        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let result = loop {
            tokio::select! {
                // Handle incoming messages from client
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(msg)) => {
                            if let Err(e) = self.handle_client_message(connection_id, msg, &tx).await {
                                log::error!(
                                    "Error handling message from connection {}: {}",
                                    connection_id,
                                    e
                                );
                                break Err(e);
                            }
                        }
                        Some(Err(e)) => {
                            log::error!(
                                "WebSocket error on connection {}: {}",
                                connection_id,
                                e
                            );
                            break Err(WsError::ConnectionClosed {
                                reason: format!("WebSocket error: {}", e),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                        None => {
                            log::info!("Connection {} closed by client", connection_id);
                            break Ok(());
                        }
                    }
                }

                // Handle graceful shutdown
                _ = shutdown_guard.wait() => {
                    log::info!("Shutting down connection {} gracefully", connection_id);
                    break Ok(());
                }
            }
        };

        // Cleanup
        self.registry.unregister(connection_id).await;
        drop(tx); // Close channel to terminate send task
        let _ = send_task.await;

        log::info!(
            "WebSocket connection {} closed for client {}",
            connection_id,
            self.client_label
        );

        result
    }

    /// Handle a message from the client
    async fn handle_client_message(
        &self,
        connection_id: ConnectionId,
        msg: Message,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<()> {
        match msg {
            Message::Text(text) => {
                let event = format!("Client {} wrote: {}", self.client_label, text);
                self.registry.broadcast(&event).await;
                Ok(())
            }
            Message::Binary(data) => {
                log::debug!(
                    "Ignoring binary message ({} bytes) from connection {}",
                    data.len(),
                    connection_id
                );
                Ok(())
            }
            Message::Ping(data) => {
                tx.send(Message::Pong(data)).await.map_err(|_| WsError::SendBufferFull {
                    location: ErrorLocation::from(Location::caller()),
                })?;
                Ok(())
            }
            Message::Pong(_) => {
                // Heartbeat response received
                Ok(())
            }
            Message::Close(_) => {
                log::info!("Received close frame from connection {}", connection_id);
                Ok(())
            }
        }
    }
}
