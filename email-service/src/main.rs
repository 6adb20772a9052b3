use dotenvy::dotenv;
use email_service::config::RelayConfig;
use email_service::startup::Application;
use service_core::observability::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing("email-service", "info");

    let configuration = RelayConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let app = Application::build(configuration).await?;
    info!("Starting email-service on port {}", app.port());

    app.run_until_stopped().await?;

    Ok(())
}
