use super::{expect_json, Backend};
use crate::config::BackendSettings;
use crate::models::Certificado;
use reqwest::Client;
use service_core::error::AppError;

pub struct CertificadosClient {
    backend: Backend,
}

impl CertificadosClient {
    pub fn new(client: Client, settings: BackendSettings) -> Self {
        Self {
            backend: Backend::new(client, settings),
        }
    }

    /// Public lookup by validation code. A revoked certificate is still a
    /// found record; only a 404 means "not found".
    pub async fn by_codigo(&self, codigo: &str) -> Result<Certificado, AppError> {
        expect_json(self.backend.get(&format!("/codigo/{}", codigo))).await
    }

    pub async fn by_inscricao(
        &self,
        inscricao_id: &str,
        evento_id: &str,
    ) -> Result<Certificado, AppError> {
        expect_json(
            self.backend
                .get(&format!("/inscricao/{}/evento/{}", inscricao_id, evento_id)),
        )
        .await
    }
}
