use serde::Serialize;

/// Plain confirmation message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
