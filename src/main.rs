use wercha_api::utils::logger;
use wercha_api::{Config, Server, ServerState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment: .env, then logging from config
    dotenv::dotenv().ok();
    let config = Config::from_env();
    logger::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!("wercha-api starting...");

    // 2. Initialize state (database, migrations, JWT service)
    let state = ServerState::initialize(&config).await?;

    // 3. Run the HTTP server until shutdown
    let server = Server::with_state(state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
