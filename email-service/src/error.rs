use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::mailer::MailerError;

/// Wire-facing errors of the relay. The body is always `{ "error": .. }`.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid API KEY")]
    InvalidApiKey,

    #[error("Missing parameters")]
    MissingParameters,

    #[error("Template not found")]
    TemplateNotFound,

    /// Transport failures are reported as a generic 500; the cause only
    /// goes to the logs.
    #[error("Internal server error")]
    Transport(#[source] MailerError),
}

impl RelayError {
    fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            RelayError::MissingParameters | RelayError::TemplateNotFound => {
                StatusCode::BAD_REQUEST
            }
            RelayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        if let RelayError::Transport(cause) = &self {
            tracing::error!(error = %cause, "email dispatch failed");
        }

        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
