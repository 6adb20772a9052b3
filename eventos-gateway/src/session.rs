//! Session cookie lifecycle.
//!
//! The session is nothing more than the auth service's opaque bearer token
//! stored client-side in an HTTP-only cookie. The gateway never interprets
//! it, only forwards it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use service_core::error::AppError;
use time::Duration;

pub const SESSION_COOKIE: &str = "access_token";

const SESSION_TTL: Duration = Duration::days(45);

/// Cookie carrying a freshly issued bearer token.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .max_age(SESSION_TTL)
        .build()
}

/// Logout: overwrite with an empty value and zero max-age. The token is not
/// revoked upstream, only forgotten client-side.
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

pub fn require_token(jar: &CookieJar) -> Result<String, AppError> {
    session_token(jar).ok_or_else(|| AppError::Unauthorized("Não autenticado".to_string()))
}
