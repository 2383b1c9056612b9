use pixvault_api::{setup, telemetry};
use pixvault_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    telemetry::init_tracing();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (database, storage, routes)
    let (_state, router) = setup::initialize_app(&config).await?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}
