//! Typed clients for the backend microservices.
//!
//! Every outbound request carries the service's static `x-api-key`;
//! user-scoped requests additionally relay the session's bearer token.
//! Calls share one reqwest client with a fixed 10 second timeout and are
//! never retried.

pub mod auth_client;
pub mod certificados_client;
pub mod checkins_client;
pub mod eventos_client;
pub mod inscricoes_client;

pub use auth_client::AuthClient;
pub use certificados_client::CertificadosClient;
pub use checkins_client::CheckinsClient;
pub use eventos_client::EventosClient;
pub use inscricoes_client::InscricoesClient;

use crate::config::BackendSettings;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use std::time::Duration;

pub const API_KEY_HEADER: &str = "x-api-key";

pub const BACKEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the reqwest client shared by all backend wrappers.
pub fn build_http_client() -> Result<Client, AppError> {
    Client::builder()
        .timeout(BACKEND_TIMEOUT)
        .build()
        .map_err(AppError::Transport)
}

/// One backend service endpoint plus its credentials.
#[derive(Clone)]
pub(crate) struct Backend {
    client: Client,
    base_url: String,
    settings: BackendSettings,
}

impl Backend {
    pub(crate) fn new(client: Client, settings: BackendSettings) -> Self {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            settings,
        }
    }

    /// Start a request against `{base_url}{path}` with the service API key.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .header(API_KEY_HEADER, self.settings.api_key.expose_secret())
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub(crate) fn patch(&self, path: &str) -> RequestBuilder {
        self.request(Method::PATCH, path)
    }
}

/// Send a request and decode a successful JSON reply.
///
/// Non-success statuses become [`AppError::Upstream`] with the backend's
/// own status and message so handlers can relay them verbatim.
pub(crate) async fn expect_json<T: DeserializeOwned>(
    builder: RequestBuilder,
) -> Result<T, AppError> {
    let response = builder.send().await?;
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(upstream_error(response).await)
    }
}

/// Translate a non-success backend reply into an error carrying its status
/// and, when parseable, its own `detail`/`message` text.
pub(crate) async fn upstream_error(response: Response) -> AppError {
    let status = response.status();
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("detail")
                .or_else(|| body.get("message"))
                .and_then(|m| m.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| format!("serviço respondeu {}", status.as_u16()));

    tracing::warn!(status = %status, %message, "upstream error");
    AppError::Upstream(status, message)
}

/// Guard against the rare backend that answers 2xx without the documented
/// body; used where the gateway only needs to know the call succeeded.
pub(crate) async fn expect_success(builder: RequestBuilder) -> Result<StatusCode, AppError> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
        Ok(status)
    } else {
        Err(upstream_error(response).await)
    }
}
