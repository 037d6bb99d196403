//! Server entry point: logging, configuration, HTTP serve loop.

use tracing_subscriber::EnvFilter;

use taskboard::api;
use taskboard::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taskboard=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(
        "Starting taskboard {} (db: {})",
        env!("CARGO_PKG_VERSION"),
        config.database_path.display()
    );

    api::routes::serve(config).await
}
