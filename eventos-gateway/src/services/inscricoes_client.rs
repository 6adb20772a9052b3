use super::{expect_json, Backend};
use crate::config::BackendSettings;
use crate::models::Inscricao;
use reqwest::Client;
use service_core::error::AppError;

pub struct InscricoesClient {
    backend: Backend,
}

impl InscricoesClient {
    pub fn new(client: Client, settings: BackendSettings) -> Self {
        Self {
            backend: Backend::new(client, settings),
        }
    }

    /// Create a registration. The created record is relayed verbatim, so
    /// the reply stays an untyped JSON value.
    pub async fn create(
        &self,
        token: &str,
        evento_id: &str,
        usuario_id: &str,
    ) -> Result<serde_json::Value, AppError> {
        expect_json(
            self.backend
                .post("")
                .bearer_auth(token)
                .query(&[("evento_id", evento_id), ("usuario_id", usuario_id)]),
        )
        .await
    }

    pub async fn get(&self, inscricao_id: &str) -> Result<Inscricao, AppError> {
        expect_json(self.backend.get(&format!("/{}", inscricao_id))).await
    }

    pub async fn list_by_usuario(&self, usuario_id: &str) -> Result<Vec<Inscricao>, AppError> {
        expect_json(self.backend.get(&format!("/usuario/{}", usuario_id))).await
    }

    pub async fn cancel(&self, token: &str, inscricao_id: &str) -> Result<(), AppError> {
        super::expect_success(
            self.backend
                .patch(&format!("/{}/cancelar", inscricao_id))
                .bearer_auth(token),
        )
        .await?;
        Ok(())
    }
}
