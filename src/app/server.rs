use crate::adapters::ReqwestUpstream;
use crate::app::routes::{create_router, AppState};
use crate::config::ConsoleConfig;
use crate::core::proxy::{ProxyService, UpstreamTargets};
use crate::utils::error::Result;
use std::sync::Arc;

pub fn build_state(config: &ConsoleConfig) -> Result<AppState> {
    let upstream = ReqwestUpstream::from_config(config)?;
    let targets = UpstreamTargets::from_config(config);

    tracing::info!(
        clients = %targets.clients,
        standards = %targets.standards,
        mappings = %targets.mappings,
        "Upstream targets configured"
    );

    Ok(AppState {
        proxy: Arc::new(ProxyService::new(Arc::new(upstream), targets)),
    })
}

pub async fn serve(config: &ConsoleConfig) -> Result<()> {
    let addr = config.bind_addr()?;
    let router = create_router(build_state(config)?);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Proxy listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
