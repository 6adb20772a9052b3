use axum::{
    middleware::from_fn,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::handlers::{
    certificados::certificado_por_codigo,
    inscricoes::{cancelar_inscricao, inscrever},
    pages,
    session::{create_session, destroy_session, me},
    usuarios::{cadastrar_senha_rapido, completar_cadastro, registrar, verificar_usuario_rapido},
};
use crate::middleware::auth::require_session;
use crate::AppState;
use service_core::error::AppError;

pub fn build_router(state: AppState) -> Router {
    let app_pages = Router::new()
        .route("/eventos", get(pages::eventos_page))
        .route("/minhas-inscricoes", get(pages::minhas_inscricoes_page))
        .route("/completar-cadastro", get(pages::completar_cadastro_page))
        .route_layer(from_fn(require_session));

    let api = Router::new()
        .route("/session", post(create_session).delete(destroy_session))
        .route("/me", get(me))
        .route("/inscrever", post(inscrever))
        .route("/cancelar-inscricao", post(cancelar_inscricao))
        .route("/registrar", post(registrar))
        .route("/cadastrar-senha-rapido", post(cadastrar_senha_rapido))
        .route("/completar-cadastro", patch(completar_cadastro))
        .route("/verificar-usuario-rapido", get(verificar_usuario_rapido))
        .route("/certificado/:codigo", get(certificado_por_codigo));

    Router::new()
        .route("/health", get(pages::health))
        .route("/login", get(pages::login_page))
        .route("/registrar", get(pages::registrar_page))
        .route(
            "/validar-certificado/:codigo",
            get(pages::validar_certificado_page),
        )
        .nest("/app", app_pages)
        .nest("/api", api)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
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
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        let state = AppState::new(&config)?;
        let router = build_router(state);

        let address = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("failed to bind listener to {}: {}", address, e);
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
