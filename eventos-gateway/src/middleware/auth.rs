use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::session::SESSION_COOKIE;

/// Guard for the `/app` page subtree: without a session cookie the browser
/// is sent to the login page. A present-but-dead token is caught later by
/// the handlers when they resolve the profile.
pub async fn require_session(jar: CookieJar, request: Request<Body>, next: Next) -> Response {
    if jar.get(SESSION_COOKIE).is_none() {
        return Redirect::to("/login").into_response();
    }

    next.run(request).await
}
