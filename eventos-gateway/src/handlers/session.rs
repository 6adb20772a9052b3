use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use serde_json::json;
use service_core::error::AppError;

use crate::models::Usuario;
use crate::session::{clear_session_cookie, require_token, session_cookie};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub ok: bool,
    #[serde(rename = "requiresCompletion")]
    pub requires_completion: bool,
    pub user: Usuario,
}

/// POST /api/session: exchange credentials for a session cookie.
///
/// After the auth service issues a token, the profile is fetched with it to
/// decide whether the user still has to complete their registration.
pub async fn create_session(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    let token = state.auth.login(&payload.email, &payload.senha).await?;
    let user = state.auth.me(&token).await?;
    let requires_completion = user.perfil_incompleto();

    tracing::info!(user_id = %user.id, requires_completion, "user logged in");

    let jar = jar.add(session_cookie(token, state.production));

    Ok((
        jar,
        Json(SessionResponse {
            ok: true,
            requires_completion,
            user,
        }),
    ))
}

/// DELETE /api/session: forget the token client-side. No backend call.
pub async fn destroy_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<serde_json::Value>) {
    (
        jar.add(clear_session_cookie(state.production)),
        Json(json!({ "ok": true })),
    )
}

/// GET /api/me: current profile, or 401 without a session.
pub async fn me(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Usuario>, AppError> {
    let token = require_token(&jar)?;
    Ok(Json(state.auth.me(&token).await?))
}
