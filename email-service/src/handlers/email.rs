use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RelayError;
use crate::startup::AppState;
use crate::templates::Template;

#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub success: bool,
    #[serde(rename = "messageId")]
    pub message_id: String,
}

/// POST /email/send: render one of the fixed templates and relay it.
///
/// The API key was already checked by the router middleware; parameter
/// validation happens here, template resolution rejects unknown names, and
/// a transport failure is a generic 500.
#[tracing::instrument(skip(state, request))]
pub async fn send_email(
    State(state): State<AppState>,
    Json(request): Json<SendEmailRequest>,
) -> Result<Json<SendEmailResponse>, RelayError> {
    // Empty strings count as missing, same as absent keys
    let (to, subject, template_name) = match (
        request.to.filter(|s| !s.is_empty()),
        request.subject.filter(|s| !s.is_empty()),
        request.template.filter(|s| !s.is_empty()),
    ) {
        (Some(to), Some(subject), Some(template)) => (to, subject, template),
        _ => return Err(RelayError::MissingParameters),
    };

    let template =
        Template::resolve(&template_name, &request.data).ok_or(RelayError::TemplateNotFound)?;

    let html = template.render();

    let message_id = state
        .mailer
        .send(&to, &subject, &html)
        .await
        .map_err(RelayError::Transport)?;

    tracing::info!(%to, template = %template_name, %message_id, "email relayed");

    Ok(Json(SendEmailResponse {
        success: true,
        message_id,
    }))
}
