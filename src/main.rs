use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dishtalk::connector::api::http;
use dishtalk::connector::api::Router;
use dishtalk::{Commands, Container, ContainerConfig};

#[derive(Parser)]
#[command(name = "dishtalk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use offline mock upstreams instead of the configured LLM API
    #[arg(long, global = true)]
    mock_upstream: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = ContainerConfig::from_env();
    config.mock_upstream = cli.mock_upstream;

    if !config.mock_upstream && !config.upstream.is_configured() {
        warn!(
            "Upstream API is not configured (missing {}); chat replies will fall back to an apology",
            config.upstream.missing_settings().join(", ")
        );
    }

    match cli.command {
        Commands::Serve { host, port, dev } => {
            config.dev_mode |= dev;
            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("invalid listen address {host}:{port}"))?;

            let container = Arc::new(Container::new(config));
            info!("Starting {} on {}", dishtalk::connector::api::SERVICE_NAME, addr);
            http::serve(container, addr).await?;
        }
        command => {
            let container = Container::new(config);
            let router = Router::new(&container);
            let output = router.route(command).await?;
            if !output.is_empty() {
                println!("{}", output);
            }
        }
    }

    Ok(())
}
