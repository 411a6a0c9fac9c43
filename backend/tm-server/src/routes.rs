use crate::api::admin::admin;
use crate::api::auth::auth;
use crate::api::tasks::tasks;
use crate::health;
use crate::state::ServerState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        // WebSocket endpoint
        .route("/ws/tasks/{client_id}", get(tm_ws::handler))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Auth endpoints
        .route("/auth/register", post(auth::register))
        .route("/auth/token", post(auth::token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        // Task endpoints
        .route("/api/v1/tasks", post(tasks::create_task).get(tasks::list_tasks))
        .route(
            "/api/v1/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        // Admin endpoints
        .route("/api/v1/admin/users", get(admin::list_users))
        // Add shared state
        .with_state(state)
        // CORS middleware (allow all origins for the browser client)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
