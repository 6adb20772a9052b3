pub mod config;
pub mod enrichment;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
pub mod startup;

use axum_extra::extract::CookieJar;
use config::GatewayConfig;
use models::Usuario;
use service_core::error::AppError;
use services::{
    AuthClient, CertificadosClient, CheckinsClient, EventosClient, InscricoesClient,
};
use std::sync::Arc;

/// Shared application state: one client per backend microservice, all
/// request-scoped otherwise.
#[derive(Clone)]
pub struct AppState {
    /// Controls the `secure` attribute of the session cookie.
    pub production: bool,
    pub auth: Arc<AuthClient>,
    pub eventos: Arc<EventosClient>,
    pub inscricoes: Arc<InscricoesClient>,
    pub checkins: Arc<CheckinsClient>,
    pub certificados: Arc<CertificadosClient>,
}

impl AppState {
    pub fn new(config: &GatewayConfig) -> Result<Self, AppError> {
        let client = services::build_http_client()?;

        Ok(Self {
            production: config.server.production,
            auth: Arc::new(AuthClient::new(client.clone(), config.auth.clone())),
            eventos: Arc::new(EventosClient::new(client.clone(), config.eventos.clone())),
            inscricoes: Arc::new(InscricoesClient::new(
                client.clone(),
                config.inscricoes.clone(),
            )),
            checkins: Arc::new(CheckinsClient::new(client.clone(), config.checkins.clone())),
            certificados: Arc::new(CertificadosClient::new(client, config.certificados.clone())),
        })
    }

    /// Resolve the profile behind the session cookie.
    ///
    /// No cookie, an expired token or an unreachable auth service all look
    /// the same to callers: no user.
    pub async fn current_user(&self, jar: &CookieJar) -> Option<Usuario> {
        let token = session::session_token(jar)?;
        self.auth.me(&token).await.ok()
    }
}
