use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Certificado, Evento};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusInscricao {
    Ativa,
    Cancelada,
}

impl std::fmt::Display for StatusInscricao {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusInscricao::Ativa => write!(f, "ativa"),
            StatusInscricao::Cancelada => write!(f, "cancelada"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inscricao {
    pub id: String,
    pub evento_id: String,
    pub usuario_id: String,
    pub status: StatusInscricao,
}

/// Check-in state for one registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkin {
    #[serde(default)]
    pub tem_checkin: bool,
}

/// Registration joined with its event, check-in state and certificate.
///
/// Built fresh per request, never cached. A failed or revoked certificate
/// lookup must leave `certificado` empty so the view never claims a
/// certificate that does not (validly) exist.
#[derive(Debug, Clone, Serialize)]
pub struct InscricaoEnriquecida {
    #[serde(flatten)]
    pub inscricao: Inscricao,
    pub evento: Option<Evento>,
    pub tem_checkin: bool,
    pub certificado: Option<Certificado>,
}

impl InscricaoEnriquecida {
    /// Event start for ordering; registrations whose event could not be
    /// fetched sort as the oldest possible.
    pub fn inicio_em(&self) -> DateTime<Utc> {
        self.evento
            .as_ref()
            .map(|e| e.inicio_em)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}
