use serde::{Deserialize, Serialize};

/// Profile returned by the auth service. The gateway never interprets the
/// bearer token itself; this is whatever `/me` says about its holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    pub id: String,
    #[serde(default)]
    pub nome: String,
    pub email: String,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default = "default_papel")]
    pub papel: String,
}

fn default_papel() -> String {
    "participante".to_string()
}

impl Usuario {
    /// Quick-registered users were created without a password and must
    /// complete their profile before using the platform normally.
    pub fn is_rapido(&self) -> bool {
        self.papel == "rapido"
    }

    /// A blank name marks an incomplete profile.
    pub fn perfil_incompleto(&self) -> bool {
        self.nome.trim().is_empty()
    }
}

/// Reply of the quick-user check endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RapidoCheck {
    #[serde(rename = "isRapido")]
    pub is_rapido: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario: Option<Usuario>,
}

impl RapidoCheck {
    /// Safe default used whenever the auth service cannot answer.
    pub fn negativo() -> Self {
        RapidoCheck {
            is_rapido: false,
            usuario: None,
        }
    }
}
