//! Back-office API server binary

use anyhow::Result;
use stayops::config::StayConfig;
use stayops::server::{BackofficeStores, backoffice_router, serve};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stayops=debug,tower_http=debug")),
        )
        .init();

    let config = match std::env::var("STAYOPS_CONFIG") {
        Ok(path) => StayConfig::from_yaml_file(&path)?,
        Err(_) => StayConfig::default(),
    };

    let stores = BackofficeStores::new();
    let app = backoffice_router(&stores);

    serve(app, &config.server.bind).await
}
