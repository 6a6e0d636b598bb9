use shopdesk_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (storage, record store, services, routes)
    let (state, router) = shopdesk_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    shopdesk_api::setup::server::start_server(&config, router, state).await?;

    Ok(())
}
