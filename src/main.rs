use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use postal_lookup::core::ConfigProvider;
use postal_lookup::utils::{logger, validation::Validate};
use postal_lookup::{
    api, CliConfig, CountryLookupService, LocalStorage, RestCountriesClient, ServiceConfig,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match ServiceConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    logger::init_logger(config.verbose, config.log_format);

    tracing::info!("Starting postal-lookup");
    tracing::debug!("Effective config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.data_dir());
    let client = RestCountriesClient::from_config(&config)?;
    let service = Arc::new(CountryLookupService::new(storage, client));
    let app = api::router(service);

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;

    tracing::info!("📁 Storing countries under: {}", config.data_dir());
    tracing::info!("🌍 Upstream API: {}", config.api_base_url());
    tracing::info!("Listening on {}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("✅ Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
