use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use tm_auth::{logout_cookie, session_cookie};
use tm_core::Role;
use tm_db::{DbError, UserRepository};

use crate::api::error::{ApiError, Result};
use crate::api::extractors::current_user::CurrentUser;
use crate::api::message_response::MessageResponse;
use crate::state::ServerState;

use super::register_request::RegisterRequest;
use super::token_request::TokenRequest;
use super::token_response::TokenResponse;
use super::user_response::UserResponse;

/// POST /auth/register
///
/// Creates a new account with the default role. The password is hashed
/// on a blocking thread before it touches the database.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<UserResponse>> {
    if !payload.email.contains('@') {
        return Err(ApiError::validation_field(
            "Invalid email address",
            "email",
        ));
    }
    if payload.username.trim().is_empty() {
        return Err(ApiError::validation_field(
            "Username must not be empty",
            "username",
        ));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::validation_field(
            "Password must be at least 8 characters",
            "password",
        ));
    }

    let policy = state.verifier.policy().clone();
    let password = payload.password;
    let password_hash = tokio::task::spawn_blocking(move || policy.hash(&password))
        .await
        .map_err(|e| ApiError::internal(format!("Hashing task failed: {e}")))??;

    let repository = UserRepository::new(state.pool.clone());
    let user = repository
        .create(&payload.email, &payload.username, &password_hash, Role::User)
        .await
        .map_err(|e| match &e {
            DbError::Sqlx { source, .. } => match source {
                sqlx::Error::Database(d) if d.is_unique_violation() => {
                    ApiError::validation("Email or username already registered")
                }
                _ => ApiError::from(e),
            },
            _ => ApiError::from(e),
        })?;

    log::info!("Registered user {} ({})", user.id, user.username);

    Ok(Json(UserResponse { user: user.into() }))
}

/// POST /auth/token
///
/// Verifies credentials and issues a session token. The token is
/// returned in the body and set as the session cookie.
pub async fn token(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(payload): Json<TokenRequest>,
) -> Result<(CookieJar, Json<TokenResponse>)> {
    let user = state
        .verifier
        .authenticate(&payload.email, &payload.password)
        .await?;

    if !user.is_active {
        return Err(ApiError::unauthorized("Account is inactive"));
    }

    let access_token = state.token_issuer.issue(user.id)?;
    let cookie = session_cookie(
        access_token.clone(),
        state.token_issuer.token_lifetime_secs(),
    );

    log::info!("Issued session token for user {}", user.id);

    Ok((
        jar.add(cookie),
        Json(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        }),
    ))
}

/// POST /auth/logout
///
/// Clears the session cookie. Tokens are stateless so there is nothing
/// to revoke server side.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        jar.add(logout_cookie()),
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

/// GET /auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse { user: user.into() })
}
