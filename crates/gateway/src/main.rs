use anyhow::Context;

use mfs_gateway::config::GatewayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mfs_observability::init();

    let config = GatewayConfig::from_env().context("invalid gateway configuration")?;
    let bind_addr = config.bind_addr;
    tracing::info!(backend = config.backend.base_url(), secure_cookie = config.cookie.is_secure(), "configuration loaded");

    let app = mfs_gateway::app::build_app(config);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
