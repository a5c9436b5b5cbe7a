use anyhow::Result;
use dynrelay::{Config, ProviderClient, SharedConfig, SystemResolver};
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let config_file = std::env::args().nth(1);
    let config = config_init(config_file)?;
    let provider = Arc::new(ProviderClient::new(&config)?);
    let resolver = Arc::new(SystemResolver::new()?);

    tracing::info!("relaying updates to {}", &config.provider_base_url);
    tracing::info!("API listening on {}", &config.api_bind_addr);
    let api_server = dynrelay::new_http(config, provider, resolver);
    let api_handle = tokio::spawn(api_server);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("quitting from signal");
        },
        Ok(api_res) = api_handle => {
            if let Err(err) = api_res {
                return Err(err.into());
            }
        }
    }
    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dynrelay=info".into()),
        )
        .init();
}

fn config_init(config_file: Option<String>) -> Result<SharedConfig> {
    match config_file {
        None => {
            tracing::info!("no config file given, using defaults");
            Ok(Arc::new(Config::default()))
        }
        Some(config_file) => {
            let config = Config::try_from_file(&config_file)?;
            tracing::debug!("loaded config from {config_file}");
            Ok(Arc::new(config))
        }
    }
}
