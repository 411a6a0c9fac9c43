use crate::CurrentUser;
use crate::state::ServerState;

use tm_auth::{CredentialVerifier, PasswordPolicy, TokenIssuer};
use tm_core::{Role, User};
use tm_db::UserRepository;
use tm_ws::{
    AppState, ConnectionConfig, ConnectionLimits, ConnectionRegistry, EventPublisher,
    ShutdownCoordinator,
};

use std::sync::Arc;

use axum::{body::Body, extract::FromRequestParts, http::Request, response::IntoResponse};
use http::StatusCode;
use sqlx::SqlitePool;

async fn create_test_state() -> ServerState {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Failed to create test pool");

    sqlx::migrate!("../crates/tm-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let policy = PasswordPolicy::new(4).unwrap();
    let store = Arc::new(UserRepository::new(pool.clone()));
    let verifier = Arc::new(CredentialVerifier::new(store, policy));
    let token_issuer = Arc::new(TokenIssuer::new("HS256", b"test-secret-key", 3600).unwrap());

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

async fn seed_user(state: &ServerState, email: &str) -> User {
    let hash = state.verifier.policy().hash("hunter2-hunter2").unwrap();
    UserRepository::new(state.pool.clone())
        .create(email, email.split('@').next().unwrap(), &hash, Role::User)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_extractor_with_valid_cookie() {
    let state = create_test_state().await;
    let user = seed_user(&state, "alice@example.com").await;
    let token = state.token_issuer.issue(user.id).unwrap();

    let request = Request::builder()
        .header("Cookie", format!("access_token={token}"))
        .body(Body::empty())
        .unwrap();

    let (mut parts, _body) = request.into_parts();
    let result = CurrentUser::from_request_parts(&mut parts, &state).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().0.email, "alice@example.com");
}

#[tokio::test]
async fn test_extractor_without_cookie_returns_401() {
    let state = create_test_state().await;

    let request = Request::builder().body(Body::empty()).unwrap();

    let (mut parts, _body) = request.into_parts();
    let result = CurrentUser::from_request_parts(&mut parts, &state).await;

    let response = result.unwrap_err().into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_extractor_with_garbage_token_returns_401() {
    let state = create_test_state().await;

    let request = Request::builder()
        .header("Cookie", "access_token=not-a-jwt")
        .body(Body::empty())
        .unwrap();

    let (mut parts, _body) = request.into_parts();
    let result = CurrentUser::from_request_parts(&mut parts, &state).await;

    let response = result.unwrap_err().into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_extractor_rejects_inactive_account() {
    let state = create_test_state().await;
    let user = seed_user(&state, "bob@example.com").await;
    let token = state.token_issuer.issue(user.id).unwrap();

    sqlx::query("UPDATE users SET is_active = 0 WHERE id = ?1")
        .bind(user.id)
        .execute(&state.pool)
        .await
        .unwrap();

    let request = Request::builder()
        .header("Cookie", format!("access_token={token}"))
        .body(Body::empty())
        .unwrap();

    let (mut parts, _body) = request.into_parts();
    let result = CurrentUser::from_request_parts(&mut parts, &state).await;

    let response = result.unwrap_err().into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
