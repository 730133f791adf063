use course_gateway::app;
use shared::{init_tracing, Config, UpstreamClient};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env().map_err(|e| format!("config: {}", e))?;
    init_tracing(&config.rust_log);
    tracing::info!(
        "starting {} on port {} (upstream {})",
        config.service_name,
        config.http_port,
        config.api_url
    );

    let upstream = Arc::new(UpstreamClient::new(config.api_url.clone())?);
    let app = app(&config, upstream);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;
    Ok(())
}
