use store_server::{Config, Server, init_logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load .env before reading the configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_logger(
        &config.log_level,
        config.is_production(),
        config.log_dir.as_deref(),
    );

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        port = config.http_port,
        sites = config.sites.len(),
        "Starting store server"
    );

    Server::new(config).run().await?;
    Ok(())
}
