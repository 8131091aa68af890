//! Scholar - command-line client for the academic portal

mod cli;
mod commands;
mod output;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use scholar_application::{PortalClient, SessionRepository, TokenStore};
use scholar_infrastructure::{ClientConfig, FileSessionRepository, ReqwestTransport};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `--json` output stays parseable.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = ClientConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url).context("invalid --base-url")?;
    }
    tracing::debug!(base_url = %config.base_url, "Starting scholar");

    let transport = Arc::new(ReqwestTransport::with_timeout(config.timeout())?);
    let sessions: Arc<dyn SessionRepository> = match &config.session_file {
        Some(path) => Arc::new(FileSessionRepository::new(path)),
        None => Arc::new(FileSessionRepository::at_default_location()?),
    };
    let client = PortalClient::new(
        transport,
        TokenStore::new(),
        config.dispatcher_config(),
        Some(sessions),
    );
    client.auth().restore().await?;

    commands::run(&client, cli.command, cli.json).await
}
