use super::{expect_json, Backend};
use crate::config::BackendSettings;
use crate::models::Evento;
use reqwest::Client;
use service_core::error::AppError;

pub struct EventosClient {
    backend: Backend,
}

impl EventosClient {
    pub fn new(client: Client, settings: BackendSettings) -> Self {
        Self {
            backend: Backend::new(client, settings),
        }
    }

    /// List public/active events.
    pub async fn list(&self) -> Result<Vec<Evento>, AppError> {
        expect_json(self.backend.get("/eventos")).await
    }

    pub async fn get(&self, evento_id: &str) -> Result<Evento, AppError> {
        expect_json(self.backend.get(&format!("/eventos/{}", evento_id))).await
    }
}
