use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;

use crate::models::Certificado;
use crate::AppState;

/// GET /api/certificado/:codigo: public certificate lookup.
///
/// A revoked certificate is still a found record (200 with
/// `revogado: true`); the validation page is responsible for rendering it
/// as invalid.
pub async fn certificado_por_codigo(
    State(state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<Json<Certificado>, AppError> {
    match state.certificados.by_codigo(&codigo).await {
        Ok(certificado) => Ok(Json(certificado)),
        Err(err) if err.is_upstream_not_found() => Err(AppError::NotFound(
            "Certificado não encontrado".to_string(),
        )),
        Err(err) => Err(err),
    }
}
