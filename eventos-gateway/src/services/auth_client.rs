use super::{expect_json, Backend};
use crate::config::BackendSettings;
use crate::models::{RapidoCheck, Usuario};
use reqwest::{Client, StatusCode};
use serde_json::json;
use service_core::error::AppError;

/// Client for the external auth service.
///
/// The gateway never mints or validates tokens; it exchanges credentials
/// for an opaque bearer token and forwards it.
pub struct AuthClient {
    backend: Backend,
}

impl AuthClient {
    pub fn new(client: Client, settings: BackendSettings) -> Self {
        Self {
            backend: Backend::new(client, settings),
        }
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, senha: &str) -> Result<String, AppError> {
        let body: serde_json::Value = expect_json(
            self.backend
                .post("/login")
                .json(&json!({ "email": email, "senha": senha })),
        )
        .await?;

        body.get("access_token")
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                tracing::error!("auth service replied without access_token");
                AppError::Upstream(
                    StatusCode::BAD_GATEWAY,
                    "Resposta de autenticação sem token".to_string(),
                )
            })
    }

    /// Resolve the profile behind a bearer token.
    pub async fn me(&self, token: &str) -> Result<Usuario, AppError> {
        expect_json(self.backend.get("/me").bearer_auth(token)).await
    }

    /// Complete a quick-registered profile. Caller must have verified the
    /// "rapido" role beforehand.
    pub async fn completar_cadastro(
        &self,
        token: &str,
        nome: &str,
        cpf: Option<&str>,
        senha: &str,
    ) -> Result<Usuario, AppError> {
        expect_json(
            self.backend
                .patch("/completar-cadastro")
                .bearer_auth(token)
                .json(&json!({ "nome": nome, "cpf": cpf, "senha": senha })),
        )
        .await
    }

    /// Set a password for a quick-registered user identified by email.
    pub async fn cadastrar_senha_rapido(
        &self,
        email: &str,
        nome: &str,
        cpf: Option<&str>,
        senha: &str,
    ) -> Result<serde_json::Value, AppError> {
        expect_json(self.backend.post("/cadastrar-senha-rapido").json(&json!({
            "email": email,
            "nome": nome,
            "cpf": cpf,
            "senha": senha,
        })))
        .await
    }

    /// Full self-service registration; new users always start as
    /// "participante".
    pub async fn registrar(
        &self,
        nome: &str,
        email: &str,
        cpf: &str,
        senha: &str,
    ) -> Result<serde_json::Value, AppError> {
        expect_json(self.backend.post("/registrar").json(&json!({
            "nome": nome,
            "email": email,
            "cpf": cpf,
            "senha": senha,
            "papel": "participante",
        })))
        .await
    }

    /// Ask whether an email belongs to a quick-registered user.
    pub async fn verificar_usuario_rapido(&self, email: &str) -> Result<RapidoCheck, AppError> {
        expect_json(
            self.backend
                .get("/verificar-usuario-rapido")
                .query(&[("email", email)]),
        )
        .await
    }
}
