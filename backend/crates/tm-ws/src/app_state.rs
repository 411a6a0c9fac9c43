use crate::{ConnectionConfig, ConnectionRegistry, ShutdownCoordinator, WebSocketConnection};

use axum::{
    extract::{
        Path, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    response::Response,
};

use log::{debug, error};

/// Shared application state for WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: ConnectionRegistry,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

/// WebSocket upgrade handler
pub async fn handler(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    debug!("WebSocket upgrade request from client {}", client_id);

    ws.on_upgrade(move |socket| handle_socket(socket, client_id, state))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(socket: WebSocket, client_id: String, state: AppState) {
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = WebSocketConnection::new(client_id, state.config, state.registry);

    if let Err(e) = connection.handle(socket, shutdown_guard).await {
        error!("Connection error: {e}");
    }
}
