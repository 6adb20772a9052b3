use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error taxonomy shared by the gateway handlers.
///
/// Every variant maps to an HTTP status and a user-facing `{ "message": .. }`
/// JSON body; no raw error ever escapes a handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation error")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// A backend microservice answered with a non-success status; its own
    /// status and message are relayed verbatim.
    #[error("upstream service returned {0}: {1}")]
    Upstream(StatusCode, String),

    /// The request never reached the backend (timeout, connect failure).
    #[error("request to backend service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether this is a 404 relayed from a backend service.
    pub fn is_upstream_not_found(&self) -> bool {
        matches!(self, AppError::Upstream(status, _) if *status == StatusCode::NOT_FOUND)
    }
}

/// Collect the per-field messages of a validation failure into one line.
fn validation_message(errors: &validator::ValidationErrors) -> String {
    let messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect();

    if messages.is_empty() {
        errors.to_string()
    } else {
        messages.join(", ")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            message: String,
        }

        let (status, message) = match self {
            AppError::Validation(ref errors) => {
                (StatusCode::BAD_REQUEST, validation_message(errors))
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Upstream(status, message) => (status, message),
            AppError::Transport(err) => {
                tracing::error!(error = %err, "backend call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro ao contactar serviço".to_string(),
                )
            }
            AppError::Config(message) => {
                tracing::error!(%message, "configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno".to_string(),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
