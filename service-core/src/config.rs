use crate::error::AppError;
use std::env;

/// True when `ENVIRONMENT=prod`.
pub fn is_production() -> bool {
    env::var("ENVIRONMENT")
        .map(|v| v == "prod")
        .unwrap_or(false)
}

/// Read an environment variable with an optional default.
///
/// In production a missing value is a hard error; in dev the default applies.
pub fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::Config(format!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::Config(format!("{} is required but not set", key)))
            }
        }
    }
}
