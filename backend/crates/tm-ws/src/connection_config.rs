/// Configuration for WebSocket connections
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Send buffer size (bounded to handle backpressure)
    pub send_buffer_size: usize,
    /// Per-connection broadcast write timeout in milliseconds
    pub write_timeout_ms: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 100,
            write_timeout_ms: 1000,
        }
    }
}
