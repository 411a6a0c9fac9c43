use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

pub const AUTH_COOKIE_NAME: &str = "access_token";

/// Build the session cookie carrying a freshly issued token
pub fn session_cookie(token: String, lifetime_secs: u64) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, token))
        .path("/")
        .secure(true)
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(lifetime_secs as i64))
        .build()
}

/// Build an expired cookie that clears the session on the client
pub fn logout_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, ""))
        .path("/")
        .secure(true)
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .build()
}
