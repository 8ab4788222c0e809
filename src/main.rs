use anyhow::Context;
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::EnvFilter;

use openalex_mcp::config::Config;
use openalex_mcp::server::OpenAlexServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the MCP JSON-RPC stream.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    tracing::info!(
        "Starting openalex-mcp server, polite_pool={}, daily_limit={}",
        config.polite_pool(),
        config.daily_request_limit
    );

    let server = OpenAlexServer::new(config);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
