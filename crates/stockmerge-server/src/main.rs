use std::net::SocketAddr;
use std::sync::Arc;

use stockmerge_core::MergeConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = std::env::var("STOCKMERGE_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:5000".to_owned())
        .parse()?;

    let config = Arc::new(MergeConfig::default());
    let app = stockmerge_server::routes::configure_routes(config);

    tracing::info!("stockmerge server listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
