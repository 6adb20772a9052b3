use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde_json::json;
use service_core::error::AppError;
use std::collections::HashSet;

use crate::enrichment::{enriquecer_inscricoes, ordenar_por_inicio};
use crate::models::{Certificado, Evento, InscricaoEnriquecida, StatusInscricao, Usuario};
use crate::AppState;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {}

#[derive(Template)]
#[template(path = "registrar.html")]
pub struct RegistrarTemplate {}

/// One event row on the events page, flagged when the viewer is already
/// registered.
pub struct EventoView {
    pub evento: Evento,
    pub inscrito: bool,
}

#[derive(Template)]
#[template(path = "eventos.html")]
pub struct EventosTemplate {
    pub usuario: Usuario,
    pub eventos: Vec<EventoView>,
}

#[derive(Template)]
#[template(path = "minhas_inscricoes.html")]
pub struct MinhasInscricoesTemplate {
    pub usuario: Usuario,
    pub inscricoes: Vec<InscricaoEnriquecida>,
}

#[derive(Template)]
#[template(path = "completar_cadastro.html")]
pub struct CompletarCadastroTemplate {
    pub usuario: Usuario,
}

#[derive(Template)]
#[template(path = "validar_certificado.html")]
pub struct ValidarCertificadoTemplate {
    pub codigo: String,
    pub certificado: Option<Certificado>,
}

pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {}
}

pub async fn registrar_page() -> impl IntoResponse {
    RegistrarTemplate {}
}

/// GET /app/eventos: public events with the viewer's registration state.
/// Listing failures degrade to an empty page rather than an error.
pub async fn eventos_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(usuario) = state.current_user(&jar).await else {
        return Ok(Redirect::to("/login").into_response());
    };

    let eventos = state.eventos.list().await.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "event listing failed");
        Vec::new()
    });

    let inscritos: HashSet<String> = state
        .inscricoes
        .list_by_usuario(&usuario.id)
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|i| i.status == StatusInscricao::Ativa)
        .map(|i| i.evento_id)
        .collect();

    let eventos = eventos
        .into_iter()
        .filter(|e| e.ativo)
        .map(|evento| EventoView {
            inscrito: inscritos.contains(&evento.id),
            evento,
        })
        .collect();

    Ok(EventosTemplate { usuario, eventos }.into_response())
}

/// GET /app/minhas-inscricoes: the enriched, sorted registrations view.
pub async fn minhas_inscricoes_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(usuario) = state.current_user(&jar).await else {
        return Ok(Redirect::to("/login").into_response());
    };

    let inscricoes = state.inscricoes.list_by_usuario(&usuario.id).await?;
    let mut inscricoes = enriquecer_inscricoes(&state, inscricoes).await;
    ordenar_por_inicio(&mut inscricoes, Utc::now());

    Ok(MinhasInscricoesTemplate {
        usuario,
        inscricoes,
    }
    .into_response())
}

pub async fn completar_cadastro_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(usuario) = state.current_user(&jar).await else {
        return Ok(Redirect::to("/login").into_response());
    };

    Ok(CompletarCadastroTemplate { usuario }.into_response())
}

/// GET /validar-certificado/:codigo: public authenticity check. A found
/// record that is revoked renders as invalid, not as missing.
pub async fn validar_certificado_page(
    State(state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<Response, AppError> {
    let certificado = match state.certificados.by_codigo(&codigo).await {
        Ok(certificado) => Some(certificado),
        Err(err) if err.is_upstream_not_found() => None,
        Err(err) => return Err(err),
    };

    Ok(ValidarCertificadoTemplate {
        codigo,
        certificado,
    }
    .into_response())
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "eventos-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
