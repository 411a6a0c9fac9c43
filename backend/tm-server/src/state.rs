use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;
use tm_auth::{CredentialVerifier, TokenIssuer};
use tm_ws::EventPublisher;

/// Shared application state for REST and WebSocket handlers
#[derive(Clone)]
pub struct ServerState {
    pub pool: SqlitePool,
    pub verifier: Arc<CredentialVerifier>,
    pub token_issuer: Arc<TokenIssuer>,
    pub publisher: EventPublisher,
    pub ws: tm_ws::AppState,
}

impl FromRef<ServerState> for tm_ws::AppState {
    fn from_ref(state: &ServerState) -> Self {
        state.ws.clone()
    }
}
