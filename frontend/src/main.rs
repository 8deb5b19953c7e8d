//! Terminal front end for the dog registry.
//!
//! Reads one command per line, runs it through `RegistryApp` and prints the
//! resulting page. Logs go to stderr so they never mix with the page.

mod config;
mod render;
mod shell;
mod transport;

use std::time::Duration;

use anyhow::Context;
use registry_core::{RegistryApp, RegistryClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Cli;
use crate::shell::StdinConfirm;
use crate::transport::UreqTransport;

fn main() -> anyhow::Result<()> {
    let cli = Cli::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "registry_frontend=info,registry_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(api_url = %cli.api_url, timeout_secs = cli.timeout_secs, "starting");

    let transport = UreqTransport::new(Duration::from_secs(cli.timeout_secs));
    let mut app = RegistryApp::new(RegistryClient::new(&cli.api_url), transport, StdinConfirm);
    app.load();

    shell::run(&mut app).context("terminal I/O failed")
}
