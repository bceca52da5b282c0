//! CLI entry point for the download server.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use converter_download::artifact::FsArtifactStore;
use converter_download::convert::{convert, format_number};
use converter_download::delivery::DownloadHandler;
use converter_download::server;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

mod cli;
mod config;

use cli::{Cli, Command, ConvertArgs, ServeArgs};
use config::ServeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?cli, "CLI arguments parsed");

    match cli.command {
        Command::Serve(args) => run_serve(&args).await,
        Command::Convert(args) => run_convert(&args),
    }
}

async fn run_serve(args: &ServeArgs) -> Result<()> {
    let base_dir = std::env::current_dir().context("failed to resolve working directory")?;
    let config = ServeConfig::from_args(args, &base_dir)?;

    info!(
        artifact = %config.artifact.name(),
        path = %config.artifact.location().display(),
        "serving artifact"
    );

    let store = FsArtifactStore::new(config.artifact.location());
    let handler = DownloadHandler::new(Arc::new(config.artifact), Arc::new(store));

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!(addr = %config.addr, "listening");

    server::serve(listener, handler, shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

fn run_convert(args: &ConvertArgs) -> Result<()> {
    let result = convert(args.value, &args.from, &args.to, args.domain)?;
    debug!(
        value = args.value,
        from = %args.from,
        to = %args.to,
        domain = %args.domain,
        result,
        "converted"
    );
    println!("{}", format_number(result));
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to install Ctrl-C handler; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
