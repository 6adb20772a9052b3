use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;
use service_core::error::AppError;
use validator::Validate;

use crate::models::RapidoCheck;
use crate::session::require_token;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegistrarRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Todos os campos são obrigatórios"))]
    pub nome: String,
    #[serde(default)]
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Todos os campos são obrigatórios"))]
    pub cpf: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres"))]
    pub senha: String,
}

/// POST /api/registrar: full self-service registration.
pub async fn registrar(
    State(state): State<AppState>,
    Json(payload): Json<RegistrarRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    payload.validate()?;

    let user = state
        .auth
        .registrar(&payload.nome, &payload.email, &payload.cpf, &payload.senha)
        .await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Cadastro realizado com sucesso!",
        "user": user
    })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CadastrarSenhaRapidoRequest {
    #[serde(default)]
    #[validate(email(message = "Email, nome e senha são obrigatórios"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email, nome e senha são obrigatórios"))]
    pub nome: String,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres"))]
    pub senha: String,
}

/// POST /api/cadastrar-senha-rapido: give a quick-registered user a real
/// password. Unauthenticated: the user has no password to log in with yet.
pub async fn cadastrar_senha_rapido(
    State(state): State<AppState>,
    Json(payload): Json<CadastrarSenhaRapidoRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    payload.validate()?;

    let user = state
        .auth
        .cadastrar_senha_rapido(
            &payload.email,
            &payload.nome,
            payload.cpf.as_deref(),
            &payload.senha,
        )
        .await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Senha cadastrada com sucesso!",
        "user": user
    })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CompletarCadastroRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub nome: String,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres"))]
    pub senha: String,
}

/// PATCH /api/completar-cadastro: only quick-registered profiles may be
/// completed; anyone else gets a 403.
pub async fn completar_cadastro(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<CompletarCadastroRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let token = require_token(&jar)?;

    let user = state
        .auth
        .me(&token)
        .await
        .map_err(|_| AppError::Unauthorized("Não autenticado".to_string()))?;

    if !user.is_rapido() {
        return Err(AppError::Forbidden(
            "Apenas usuários rápidos podem completar cadastro".to_string(),
        ));
    }

    payload.validate()?;

    let atualizado = state
        .auth
        .completar_cadastro(
            &token,
            &payload.nome,
            payload.cpf.as_deref(),
            &payload.senha,
        )
        .await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Cadastro completado com sucesso!",
        "user": atualizado
    })))
}

#[derive(Debug, Deserialize)]
pub struct VerificarRapidoParams {
    #[serde(default)]
    pub email: Option<String>,
}

/// GET /api/verificar-usuario-rapido: never surfaces a hard error: any
/// backend failure degrades to `isRapido: false` with 200.
pub async fn verificar_usuario_rapido(
    State(state): State<AppState>,
    Query(params): Query<VerificarRapidoParams>,
) -> Result<Json<RapidoCheck>, AppError> {
    let email = params
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::BadRequest("Email é obrigatório".to_string()))?;

    match state.auth.verificar_usuario_rapido(&email).await {
        Ok(check) => Ok(Json(check)),
        Err(err) => {
            tracing::warn!(error = %err, "quick-user check failed, degrading to negative");
            Ok(Json(RapidoCheck::negativo()))
        }
    }
}
