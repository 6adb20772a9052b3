use dotenvy::dotenv;
use eventos_gateway::config::GatewayConfig;
use eventos_gateway::startup::Application;
use service_core::observability::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing("eventos-gateway", "info");

    let configuration = GatewayConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let app = Application::build(configuration).await?;
    info!("Starting eventos-gateway on port {}", app.port());

    app.run_until_stopped().await?;

    Ok(())
}
