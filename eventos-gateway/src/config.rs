use secrecy::Secret;
use service_core::config::{get_env, is_production};
use service_core::error::AppError;

/// Immutable gateway configuration, built once at startup from the
/// environment and handed to every client.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub server: ServerSettings,
    pub auth: BackendSettings,
    pub eventos: BackendSettings,
    pub inscricoes: BackendSettings,
    pub checkins: BackendSettings,
    pub certificados: BackendSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Controls the `secure` attribute of the session cookie.
    pub production: bool,
}

/// Address and static service API key of one backend microservice.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        let is_prod = is_production();

        Ok(GatewayConfig {
            server: ServerSettings {
                host: get_env("GATEWAY_HOST", Some("0.0.0.0"), is_prod)?,
                port: get_env("GATEWAY_PORT", Some("3000"), is_prod)?
                    .parse()
                    .unwrap_or(3000),
                production: is_prod,
            },
            auth: backend("AUTH", "http://localhost:8001", is_prod)?,
            eventos: backend("EVENTOS", "http://localhost:8002", is_prod)?,
            inscricoes: backend("INSCRICOES", "http://localhost:8004", is_prod)?,
            checkins: backend("CHECKINS", "http://localhost:8005", is_prod)?,
            certificados: backend("CERTIFICADOS", "http://localhost:8006", is_prod)?,
        })
    }
}

fn backend(prefix: &str, default_url: &str, is_prod: bool) -> Result<BackendSettings, AppError> {
    Ok(BackendSettings {
        base_url: get_env(&format!("{}_SERVICE_URL", prefix), Some(default_url), is_prod)?,
        api_key: Secret::new(get_env(&format!("{}_API_KEY", prefix), Some(""), is_prod)?),
    })
}
