use crate::ConnectionId;

use axum::extract::ws::Message;
use chrono::DateTime;
use tokio::sync::mpsc;

/// Information about an active connection
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    /// Caller-supplied label carried in broadcast events
    pub client_label: String,
    pub connected_at: DateTime<chrono::Utc>,
    /// Outgoing message channel owned by the connection's send task
    pub sender: mpsc::Sender<Message>,
}
