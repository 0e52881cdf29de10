//! Serve command: MCP server on stdio.

use anyhow::Context;
use cefr_lens_core::config::Config;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use crate::server::CefrServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Run the MCP server until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input_bytes: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    let server = CefrServer::with_config(config.score_config(), max_input_bytes);
    info!(?max_input_bytes, "starting MCP server on stdio");

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server failed")?;

    info!("MCP server stopped");
    Ok(())
}
