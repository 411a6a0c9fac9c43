pub mod app_state;
pub mod connection_config;
pub mod connection_id;
pub mod connection_info;
pub mod connection_limits;
pub mod connection_registry;
pub mod error;
pub mod event_publisher;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod web_socket_connection;

pub use app_state::{AppState, handler};
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_info::ConnectionInfo;
pub use connection_limits::ConnectionLimits;
pub use connection_registry::ConnectionRegistry;
pub use error::{Result, WsError};
pub use event_publisher::EventPublisher;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use web_socket_connection::WebSocketConnection;

#[cfg(test)]
mod tests;
