use bartab::config::BarTabConfig;
use bartab::server::ServerBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bartab=info,tower_http=info")),
        )
        .init();

    let config = BarTabConfig::from_env()?;

    ServerBuilder::new().with_config(config).serve().await
}
