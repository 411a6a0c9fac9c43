//! Axum extractors for REST API authentication

use crate::{ApiError, ServerState};

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use tm_core::User;
use tm_db::UserRepository;

/// Extracts the authenticated user from the session cookie.
///
/// Validates the token carried in the `access_token` cookie, loads the
/// account, and rejects inactive accounts. Every failure collapses onto a
/// generic 401 so the response does not reveal which check failed.
#[derive(Debug)]
pub struct CurrentUser(pub User);

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let jar = CookieJar::from_headers(&parts.headers);

            let token = jar
                .get(tm_auth::AUTH_COOKIE_NAME)
                .map(|cookie| cookie.value().to_string())
                .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

            let claims = state.token_issuer.validate(&token)?;
            let user_id = claims.subject_id()?;

            let repo = UserRepository::new(state.pool.clone());
            let user = repo
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

            if !user.is_active {
                log::warn!("Rejected inactive account {}", user.id);
                return Err(ApiError::unauthorized("Account is inactive"));
            }

            Ok(CurrentUser(user))
        }
    }
}
