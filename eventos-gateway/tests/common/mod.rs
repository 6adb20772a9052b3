#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Request, StatusCode},
    middleware::{from_fn, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use eventos_gateway::config::{BackendSettings, GatewayConfig, ServerSettings};
use eventos_gateway::startup::Application;
use secrecy::Secret;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// API key every backend stub expects from the gateway.
pub const TEST_BACKEND_KEY: &str = "test-backend-key";

/// In-memory state of the stub microservices.
#[derive(Default)]
pub struct Fixtures {
    /// (email, senha) -> token
    pub credentials: HashMap<(String, String), String>,
    /// token -> profile
    pub users: HashMap<String, Value>,
    /// evento_id -> evento
    pub eventos: HashMap<String, Value>,
    /// inscricao_id -> inscricao
    pub inscricoes: HashMap<String, Value>,
    /// inscricao ids whose fetch answers 500
    pub inscricao_errors: HashSet<String>,
    /// inscricao_id -> tem_checkin
    pub checkins: HashMap<String, bool>,
    /// inscricao ids whose check-in lookup answers 500
    pub checkin_errors: HashSet<String>,
    /// inscricao_id -> certificado
    pub certificados_por_inscricao: HashMap<String, Value>,
    /// codigo -> certificado
    pub certificados_por_codigo: HashMap<String, Value>,
    /// emails whose quick-user check answers 500
    pub rapido_errors: HashSet<String>,
    /// emails that are quick-registered users
    pub rapidos: HashSet<String>,
    /// cancellations that reached the registrations stub
    pub cancelados: Vec<String>,
}

impl Fixtures {
    pub fn with_user(mut self, token: &str, id: &str, nome: &str, email: &str, papel: &str) -> Self {
        self.users.insert(
            token.to_string(),
            json!({ "id": id, "nome": nome, "email": email, "papel": papel }),
        );
        self
    }

    pub fn with_credentials(mut self, email: &str, senha: &str, token: &str) -> Self {
        self.credentials
            .insert((email.to_string(), senha.to_string()), token.to_string());
        self
    }

    pub fn with_evento(mut self, id: &str, titulo: &str, inicio_em: &str) -> Self {
        self.eventos.insert(
            id.to_string(),
            json!({
                "id": id,
                "titulo": titulo,
                "descricao": null,
                "local": null,
                "inicio_em": inicio_em,
                "ativo": true
            }),
        );
        self
    }

    pub fn with_inscricao(mut self, id: &str, evento_id: &str, usuario_id: &str) -> Self {
        self.inscricoes.insert(
            id.to_string(),
            json!({
                "id": id,
                "evento_id": evento_id,
                "usuario_id": usuario_id,
                "status": "ativa"
            }),
        );
        self
    }

    pub fn with_inscricao_error(mut self, inscricao_id: &str) -> Self {
        self.inscricao_errors.insert(inscricao_id.to_string());
        self
    }

    pub fn with_checkin(mut self, inscricao_id: &str, tem_checkin: bool) -> Self {
        self.checkins.insert(inscricao_id.to_string(), tem_checkin);
        self
    }

    pub fn with_checkin_error(mut self, inscricao_id: &str) -> Self {
        self.checkin_errors.insert(inscricao_id.to_string());
        self
    }

    pub fn with_certificado(
        mut self,
        inscricao_id: &str,
        evento_id: &str,
        codigo: &str,
        revogado: bool,
    ) -> Self {
        let certificado = json!({
            "id": format!("cert-{}", codigo),
            "inscricao_id": inscricao_id,
            "evento_id": evento_id,
            "codigo_certificado": codigo,
            "emitido_em": "2026-01-10T12:00:00Z",
            "revogado": revogado
        });
        self.certificados_por_inscricao
            .insert(inscricao_id.to_string(), certificado.clone());
        self.certificados_por_codigo
            .insert(codigo.to_string(), certificado);
        self
    }

    pub fn with_rapido_error(mut self, email: &str) -> Self {
        self.rapido_errors.insert(email.to_string());
        self
    }
}

pub type SharedFixtures = Arc<Mutex<Fixtures>>;

fn not_found(detail: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// Every stub call must carry the service API key the gateway is
/// configured with.
async fn check_api_key(request: Request<Body>, next: Next) -> Response {
    let provided = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok());

    if provided != Some(TEST_BACKEND_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "API key inválida" })),
        )
            .into_response();
    }

    next.run(request).await
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    senha: String,
}

async fn mock_login(
    State(fixtures): State<SharedFixtures>,
    Json(body): Json<LoginBody>,
) -> Response {
    let fixtures = fixtures.lock().unwrap();
    match fixtures.credentials.get(&(body.email, body.senha)) {
        Some(token) => Json(json!({ "access_token": token, "token_type": "bearer" })).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Credenciais inválidas" })),
        )
            .into_response(),
    }
}

async fn mock_me(State(fixtures): State<SharedFixtures>, headers: HeaderMap) -> Response {
    let fixtures = fixtures.lock().unwrap();
    bearer(&headers)
        .and_then(|token| fixtures.users.get(&token).cloned())
        .map(|user| Json(user).into_response())
        .unwrap_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": "Token inválido" })),
            )
                .into_response()
        })
}

#[derive(Deserialize)]
struct EmailParam {
    email: String,
}

async fn mock_verificar_rapido(
    State(fixtures): State<SharedFixtures>,
    Query(params): Query<EmailParam>,
) -> Response {
    let fixtures = fixtures.lock().unwrap();
    if fixtures.rapido_errors.contains(&params.email) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "erro interno" })),
        )
            .into_response();
    }
    Json(json!({ "isRapido": fixtures.rapidos.contains(&params.email) })).into_response()
}

async fn mock_eventos_list(State(fixtures): State<SharedFixtures>) -> Response {
    let fixtures = fixtures.lock().unwrap();
    let eventos: Vec<Value> = fixtures.eventos.values().cloned().collect();
    Json(eventos).into_response()
}

async fn mock_evento(
    State(fixtures): State<SharedFixtures>,
    Path(id): Path<String>,
) -> Response {
    let fixtures = fixtures.lock().unwrap();
    match fixtures.eventos.get(&id) {
        Some(evento) => Json(evento.clone()).into_response(),
        None => not_found("Evento não encontrado"),
    }
}

#[derive(Deserialize)]
struct CriarInscricaoParams {
    evento_id: String,
    usuario_id: String,
}

async fn mock_criar_inscricao(
    State(fixtures): State<SharedFixtures>,
    headers: HeaderMap,
    Query(params): Query<CriarInscricaoParams>,
) -> Response {
    if bearer(&headers).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Não autenticado" })),
        )
            .into_response();
    }

    let mut fixtures = fixtures.lock().unwrap();
    if !fixtures.eventos.contains_key(&params.evento_id) {
        return not_found("Evento não encontrado");
    }

    let id = format!("insc-{}", fixtures.inscricoes.len() + 1);
    fixtures.inscricoes.insert(
        id.clone(),
        json!({
            "id": id,
            "evento_id": params.evento_id,
            "usuario_id": params.usuario_id,
            "status": "ativa"
        }),
    );

    (
        StatusCode::CREATED,
        Json(json!({ "inscricao_id": id, "message": "Inscrição criada" })),
    )
        .into_response()
}

async fn mock_inscricao(
    State(fixtures): State<SharedFixtures>,
    Path(id): Path<String>,
) -> Response {
    let fixtures = fixtures.lock().unwrap();
    if fixtures.inscricao_errors.contains(&id) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "erro interno" })),
        )
            .into_response();
    }
    match fixtures.inscricoes.get(&id) {
        Some(inscricao) => Json(inscricao.clone()).into_response(),
        None => not_found("Inscrição não encontrada"),
    }
}

async fn mock_inscricoes_por_usuario(
    State(fixtures): State<SharedFixtures>,
    Path(usuario_id): Path<String>,
) -> Response {
    let fixtures = fixtures.lock().unwrap();
    let inscricoes: Vec<Value> = fixtures
        .inscricoes
        .values()
        .filter(|i| i["usuario_id"] == usuario_id.as_str())
        .cloned()
        .collect();
    Json(inscricoes).into_response()
}

async fn mock_cancelar_inscricao(
    State(fixtures): State<SharedFixtures>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if bearer(&headers).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Não autenticado" })),
        )
            .into_response();
    }

    let mut fixtures = fixtures.lock().unwrap();
    match fixtures.inscricoes.get_mut(&id) {
        Some(inscricao) => {
            inscricao["status"] = json!("cancelada");
            fixtures.cancelados.push(id);
            Json(json!({ "ok": true })).into_response()
        }
        None => not_found("Inscrição não encontrada"),
    }
}

async fn mock_checkin(
    State(fixtures): State<SharedFixtures>,
    Path(inscricao_id): Path<String>,
) -> Response {
    let fixtures = fixtures.lock().unwrap();
    if fixtures.checkin_errors.contains(&inscricao_id) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "erro interno" })),
        )
            .into_response();
    }
    let tem_checkin = fixtures.checkins.get(&inscricao_id).copied().unwrap_or(false);
    Json(json!({ "tem_checkin": tem_checkin })).into_response()
}

async fn mock_certificado_por_inscricao(
    State(fixtures): State<SharedFixtures>,
    Path((inscricao_id, _evento_id)): Path<(String, String)>,
) -> Response {
    let fixtures = fixtures.lock().unwrap();
    match fixtures.certificados_por_inscricao.get(&inscricao_id) {
        Some(certificado) => Json(certificado.clone()).into_response(),
        None => not_found("Certificado não encontrado"),
    }
}

async fn mock_certificado_por_codigo(
    State(fixtures): State<SharedFixtures>,
    Path(codigo): Path<String>,
) -> Response {
    let fixtures = fixtures.lock().unwrap();
    match fixtures.certificados_por_codigo.get(&codigo) {
        Some(certificado) => Json(certificado.clone()).into_response(),
        None => not_found("Certificado não encontrado"),
    }
}

/// One axum router stands in for all five backend microservices, each
/// namespaced under its own prefix.
fn mock_backend_router(fixtures: SharedFixtures) -> Router {
    Router::new()
        .route("/auth/login", post(mock_login))
        .route("/auth/me", get(mock_me))
        .route("/auth/verificar-usuario-rapido", get(mock_verificar_rapido))
        .route("/eventos", get(mock_eventos_list))
        .route("/eventos/:id", get(mock_evento))
        .route("/inscricoes", post(mock_criar_inscricao))
        .route("/inscricoes/:id", get(mock_inscricao))
        .route("/inscricoes/usuario/:usuario_id", get(mock_inscricoes_por_usuario))
        .route("/inscricoes/:id/cancelar", patch(mock_cancelar_inscricao))
        .route("/checkins/inscricao/:id", get(mock_checkin))
        .route(
            "/certificados/inscricao/:inscricao_id/evento/:evento_id",
            get(mock_certificado_por_inscricao),
        )
        .route("/certificados/codigo/:codigo", get(mock_certificado_por_codigo))
        .layer(from_fn(check_api_key))
        .with_state(fixtures)
}

pub struct TestApp {
    pub address: String,
    pub fixtures: SharedFixtures,
}

impl TestApp {
    pub async fn spawn(fixtures: Fixtures) -> Self {
        let fixtures = Arc::new(Mutex::new(fixtures));

        // Backend stubs on a random port
        let backend_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let backend_base = format!("http://127.0.0.1:{}", backend_listener.local_addr().unwrap().port());
        let backend_router = mock_backend_router(fixtures.clone());
        tokio::spawn(async move {
            axum::serve(backend_listener, backend_router).await.ok();
        });

        let backend = |prefix: &str| BackendSettings {
            base_url: format!("{}{}", backend_base, prefix),
            api_key: Secret::new(TEST_BACKEND_KEY.to_string()),
        };

        let config = GatewayConfig {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                // Random port for testing
                port: 0,
                production: false,
            },
            auth: backend("/auth"),
            eventos: backend(""),
            inscricoes: backend("/inscricoes"),
            checkins: backend("/checkins"),
            certificados: backend("/certificados"),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp { address, fixtures }
    }

    /// Client that keeps the session cookie between requests.
    pub fn session_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build client")
    }

    /// Client that neither stores cookies nor follows redirects.
    pub fn plain_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build client")
    }

    pub async fn login(&self, client: &reqwest::Client, email: &str, senha: &str) -> reqwest::Response {
        client
            .post(format!("{}/api/session", self.address))
            .json(&serde_json::json!({ "email": email, "senha": senha }))
            .send()
            .await
            .expect("Failed to execute login request")
    }

    pub fn cancelados(&self) -> Vec<String> {
        self.fixtures.lock().unwrap().cancelados.clone()
    }

    pub fn inscricao_status(&self, id: &str) -> String {
        self.fixtures.lock().unwrap().inscricoes[id]["status"]
            .as_str()
            .unwrap()
            .to_string()
    }
}
