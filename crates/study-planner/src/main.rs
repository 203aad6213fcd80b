mod config;
mod error;
mod http;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Config, Transport};
use plan_common::openai::OpenAiClient;
use plan_common::planner::Planner;
use server::PlannerServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stderr only: stdout carries MCP JSON-RPC in stdio mode
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting study-planner");

    let config = Config::from_env()?;
    info!(
        base_url = %config.llm.base_url,
        model = %config.llm.model,
        temperature = config.llm.temperature,
        timeout_ms = config.llm.timeout.map(|t| t.as_millis() as u64),
        transport = ?config.transport,
        "configuration loaded"
    );

    let client = OpenAiClient::new(config.llm.clone())?;
    let planner = Planner::new(Arc::new(client));

    match config.transport {
        Transport::Http => {
            let listener = TcpListener::bind(&config.listen_addr).await?;
            info!(listen_addr = %config.listen_addr, "HTTP API ready");
            axum::serve(listener, http::router(planner)).await?;
        }
        Transport::Stdio => {
            info!("MCP server ready, serving on stdio");
            let service = PlannerServer::new(planner)
                .serve(stdio())
                .await
                .inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
            service.waiting().await?;
        }
    }

    info!("study-planner shut down");
    Ok(())
}
