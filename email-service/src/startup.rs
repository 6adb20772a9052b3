use axum::{
    body::Body,
    http::Request,
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::handlers::{email::send_email, health::health_check};
use crate::mailer::{Mailer, MockMailer, SmtpMailer};

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone)]
pub struct AppState {
    pub config: RelayConfig,
    pub mailer: Arc<dyn Mailer>,
}

/// Gate on the static API key before anything else, body parsing included.
async fn require_api_key(
    axum::extract::State(state): axum::extract::State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if provided != Some(state.config.api_key.expose_secret().as_str()) {
        return RelayError::InvalidApiKey.into_response();
    }

    next.run(request).await
}

pub fn build_router(state: AppState) -> Router {
    let email_routes = Router::new()
        .route("/send", post(send_email))
        .route_layer(from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .route("/health", get(health_check))
        .nest("/email", email_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Server container; binding is split from running so tests can spawn on
/// port 0 and learn the assigned port.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build with the transport the configuration selects: real SMTP when
    /// enabled, otherwise the mock.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let mailer: Arc<dyn Mailer> = if config.smtp.enabled {
            match SmtpMailer::new(config.smtp.clone()) {
                Ok(mailer) => {
                    tracing::info!("SMTP mailer initialized");
                    Arc::new(mailer)
                }
                Err(e) => {
                    tracing::warn!("failed to initialize SMTP mailer: {}. Using mock.", e);
                    Arc::new(MockMailer::new())
                }
            }
        } else {
            tracing::info!("SMTP disabled, using mock mailer");
            Arc::new(MockMailer::new())
        };

        Self::build_with_mailer(config, mailer).await
    }

    /// Build with an explicit transport; used by tests to observe the
    /// outbox.
    pub async fn build_with_mailer(
        config: RelayConfig,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self, AppError> {
        let port = config.port;
        let state = AppState { config, mailer };
        let router = build_router(state);

        let listener = TcpListener::bind(("0.0.0.0", port)).await.map_err(|e| {
            tracing::error!("failed to bind listener on port {}: {}", port, e);
            AppError::Internal(anyhow::Error::new(e))
        })?;
        let port = listener
            .local_addr()
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?
            .port();

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }
}
