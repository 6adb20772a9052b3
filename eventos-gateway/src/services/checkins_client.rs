use super::{expect_json, Backend};
use crate::config::BackendSettings;
use crate::models::Checkin;
use reqwest::Client;
use service_core::error::AppError;

pub struct CheckinsClient {
    backend: Backend,
}

impl CheckinsClient {
    pub fn new(client: Client, settings: BackendSettings) -> Self {
        Self {
            backend: Backend::new(client, settings),
        }
    }

    /// Check-in state of one registration.
    pub async fn by_inscricao(&self, inscricao_id: &str) -> Result<Checkin, AppError> {
        expect_json(self.backend.get(&format!("/inscricao/{}", inscricao_id))).await
    }
}
