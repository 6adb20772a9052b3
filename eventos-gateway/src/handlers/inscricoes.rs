use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;
use service_core::error::AppError;

use crate::session::require_token;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct InscreverRequest {
    #[serde(default)]
    pub evento_id: Option<String>,
    #[serde(default)]
    pub usuario_id: Option<String>,
}

/// POST /api/inscrever: relay a registration creation; the backend's
/// status and body come back verbatim on failure.
pub async fn inscrever(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<InscreverRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let token = require_token(&jar)?;

    let (evento_id, usuario_id) = match (payload.evento_id, payload.usuario_id) {
        (Some(e), Some(u)) if !e.is_empty() && !u.is_empty() => (e, u),
        _ => {
            return Err(AppError::BadRequest(
                "evento_id e usuario_id são obrigatórios".to_string(),
            ))
        }
    };

    let criada = state
        .inscricoes
        .create(&token, &evento_id, &usuario_id)
        .await?;

    Ok((StatusCode::CREATED, Json(criada)))
}

#[derive(Debug, Deserialize)]
pub struct CancelarRequest {
    #[serde(default)]
    pub inscricao_id: Option<String>,
}

/// POST /api/cancelar-inscricao: best-effort saga around a cancellation.
///
/// The registrations service does not enforce the check-in rule atomically,
/// so the gateway checks ownership and check-in state itself before
/// relaying the cancel. When the check-in lookup itself errors the
/// cancellation still proceeds.
pub async fn cancelar_inscricao(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<CancelarRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let token = require_token(&jar)?;

    let user = state
        .auth
        .me(&token)
        .await
        .map_err(|_| AppError::Unauthorized("Usuário não encontrado".to_string()))?;

    let inscricao_id = payload
        .inscricao_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("ID da inscrição é obrigatório".to_string()))?;

    let inscricao = match state.inscricoes.get(&inscricao_id).await {
        Ok(inscricao) => inscricao,
        Err(err) if err.is_upstream_not_found() => {
            return Err(AppError::NotFound("Inscrição não encontrada".to_string()))
        }
        Err(err) => return Err(err),
    };

    if inscricao.usuario_id != user.id {
        return Err(AppError::Forbidden(
            "Você não tem permissão para cancelar esta inscrição".to_string(),
        ));
    }

    match state.checkins.by_inscricao(&inscricao_id).await {
        Ok(checkin) if checkin.tem_checkin => {
            return Err(AppError::BadRequest(
                "Não é possível cancelar inscrição com check-in realizado".to_string(),
            ));
        }
        Ok(_) => {}
        Err(err) => {
            tracing::warn!(
                inscricao_id = %inscricao_id,
                error = %err,
                "check-in lookup failed, proceeding with cancellation"
            );
        }
    }

    state.inscricoes.cancel(&token, &inscricao_id).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Inscrição cancelada com sucesso"
    })))
}
