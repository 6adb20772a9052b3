use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Proof-of-attendance record owned by the certificates service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificado {
    pub id: String,
    pub inscricao_id: String,
    pub evento_id: String,
    pub codigo_certificado: String,
    pub emitido_em: DateTime<Utc>,
    #[serde(default)]
    pub revogado: bool,
}
