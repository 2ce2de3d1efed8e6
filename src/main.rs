mod api;
mod config;
mod host;
mod session;
mod sync;

use api::http::HttpClient;
use clap::Parser;
use session::Session;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const INPUT_QUEUE_DEPTH: usize = 256;

#[derive(Debug, thiserror::Error)]
enum PortalError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Api(#[from] api::ApiError),
    #[error("reading input failed: {0}")]
    Input(#[from] std::io::Error),
    #[error("input reader stopped: {0}")]
    Reader(#[from] tokio::task::JoinError),
}

#[tokio::main]
async fn main() -> Result<(), PortalError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::Cli::parse().into_config()?;
    tracing::info!(base_url = %config.base_url, project = ?config.project_slug, "starting canvas session");

    let client = Arc::new(HttpClient::new(&config)?);
    let session = Session::mount(client.as_ref(), client.clone(), config.project_slug.as_deref()).await?;

    tracing::info!(
        project_id = session.project().id,
        elements = session.controller().store.len(),
        "reading input events from stdin"
    );

    let (tx, rx) = mpsc::channel(INPUT_QUEUE_DEPTH);
    let reader = tokio::spawn(host::forward_events(BufReader::new(tokio::io::stdin()), tx));
    session.run(rx).await;

    let forwarded = reader.await??;
    tracing::info!(events = forwarded, "input closed");
    Ok(())
}
