use secrecy::Secret;
use service_core::config::{get_env, is_production};
use service_core::error::AppError;

#[derive(Clone)]
pub struct RelayConfig {
    pub port: u16,
    /// Static shared secret every caller must present in `x-api-key`.
    pub api_key: Secret<String>,
    pub smtp: SmtpConfig,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Secret<String>,
    pub from_email: String,
    pub from_name: String,
    /// Disabled deployments (and tests) fall back to the mock mailer.
    pub enabled: bool,
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let is_prod = is_production();

        Ok(RelayConfig {
            port: get_env("PORT", Some("4005"), is_prod)?
                .parse()
                .unwrap_or(4005),
            api_key: Secret::new(get_env("SERVICE_API_KEY", Some(""), is_prod)?),
            smtp: SmtpConfig {
                host: get_env("SMTP_HOST", Some("localhost"), is_prod)?,
                port: get_env("SMTP_PORT", Some("587"), is_prod)?
                    .parse()
                    .unwrap_or(587),
                user: get_env("SMTP_USER", Some(""), is_prod)?,
                password: Secret::new(get_env("SMTP_PASS", Some(""), is_prod)?),
                from_email: get_env("SMTP_FROM_EMAIL", Some("noreply@example.com"), is_prod)?,
                from_name: get_env("SMTP_FROM_NAME", Some("Sistema de Eventos"), is_prod)?,
                enabled: std::env::var("SMTP_ENABLED")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()
                    .unwrap_or(false),
            },
        })
    }
}
