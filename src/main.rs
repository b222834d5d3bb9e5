use std::sync::Arc;

use anyhow::Result;
use rmcp::{transport::stdio, ServiceExt};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use deva_mcp::tools::ToolContext;
use deva_mcp::{
    redact_api_key, AuthManager, Config, ConfigStore, DevaClient, DevaMcpServer, Settings,
};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP transport; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("DEVA_MCP_LOG_LEVEL")
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load().await?;
    info!(
        profile = %settings.profile,
        api_base = %settings.api_base,
        "starting deva-mcp"
    );
    debug!(api_key = %redact_api_key(settings.api_key.as_deref()), "credential loaded");

    let store = ConfigStore::new(&settings);
    let client = DevaClient::new(Config {
        base_url: Some(settings.api_base.clone()),
        timeout: Some(settings.timeout),
        credentials: Some(Arc::new(store.credential())),
        ..Default::default()
    })?;
    let auth = AuthManager::new(store, client.clone());

    let server = DevaMcpServer::new(ToolContext { client, auth });
    let service = server.serve(stdio()).await?;
    info!("server connected over stdio");
    service.waiting().await?;

    Ok(())
}
