#![allow(dead_code)]

//! Test infrastructure for tm-server API tests

use tm_auth::{CredentialVerifier, PasswordPolicy, TokenIssuer};
use tm_core::{Role, User};
use tm_db::UserRepository;
use tm_server::ServerState;
use tm_ws::{
    AppState, ConnectionConfig, ConnectionLimits, ConnectionRegistry, EventPublisher,
    ShutdownCoordinator,
};

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Low bcrypt cost keeps the suite fast
pub const TEST_HASH_COST: u32 = 4;
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("../crates/tm-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create ServerState for testing
pub async fn create_test_state() -> ServerState {
    let pool = create_test_pool().await;

    let policy = PasswordPolicy::new(TEST_HASH_COST).expect("Failed to create password policy");
    let store = Arc::new(UserRepository::new(pool.clone()));
    let verifier = Arc::new(CredentialVerifier::new(store, policy));
    let token_issuer =
        Arc::new(TokenIssuer::new("HS256", b"integration-test-secret", 3600).unwrap());

    let config = ConnectionConfig::default();
    let registry = ConnectionRegistry::new(ConnectionLimits { max_total: 100 }, config.clone());
    let publisher = EventPublisher::new(registry.clone());

    ServerState {
        pool,
        verifier,
        token_issuer,
        publisher,
        ws: AppState {
            registry,
            shutdown: ShutdownCoordinator::new(),
            config,
        },
    }
}

/// Create a user with the shared test password
pub async fn create_test_user(state: &ServerState, email: &str, username: &str) -> User {
    create_user_with_role(state, email, username, Role::User).await
}

/// Create an admin with the shared test password
pub async fn create_test_admin(state: &ServerState, email: &str, username: &str) -> User {
    create_user_with_role(state, email, username, Role::Admin).await
}

async fn create_user_with_role(
    state: &ServerState,
    email: &str,
    username: &str,
    role: Role,
) -> User {
    let hash = state
        .verifier
        .policy()
        .hash(TEST_PASSWORD)
        .expect("Failed to hash test password");

    UserRepository::new(state.pool.clone())
        .create(email, username, &hash, role)
        .await
        .expect("Failed to create test user")
}

/// Log in through the token endpoint and return the session cookie value
pub async fn login(app: &Router, email: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/auth/token")
        .header("Content-Type", "application/json")
        .body(Body::from(
            serde_json::json!({ "email": email, "password": TEST_PASSWORD }).to_string(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("Token endpoint must set the session cookie")
        .to_str()
        .unwrap();

    set_cookie
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

/// Collect a JSON response body
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
