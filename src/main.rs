use anyhow::Context;
use contact_backend_rust::configuration::get_configuration;
use contact_backend_rust::startup::Application;
use contact_backend_rust::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {

    // Initializing the subscriber
    let subscriber = get_subscriber("contact_backend_rust".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    // Refuse to start if the configuration is incomplete, in particular when the
    // SMTP credentials are missing. Every later failure mode assumes a fully
    // configured transport.
    let configuration = get_configuration().context("Failed to read configuration")?;

    let application = Application::build(configuration).await?;
    tracing::info!("Contact backend running on port {}", application.port());

    application.run_until_stopped().await?;
    Ok(())
}
