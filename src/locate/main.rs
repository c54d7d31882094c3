//! Interactive library locator.
//!
//! Reads postal codes from stdin, one per line, and prints the libraries
//! found near each. A new line cancels the search still in flight. With
//! `--listen`, the current map model is also served read-only over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tokio::task::JoinSet;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use stacks::config::Config;
use stacks::location::StaticLocator;
use stacks::maps::{MapsClient, ReqwestTransport};
use stacks::SearchController;

mod server;
mod session;
mod view;

#[derive(Parser, Debug)]
#[command(name = "locate")]
#[command(about = "Find public libraries near a postal code")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maps API key (overrides GOOGLE_MAPS_API_KEY and the config file)
    #[arg(long)]
    api_key: Option<String>,

    /// Device latitude; without --lat/--lon location permission is treated as denied
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Device longitude
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Serve the map model read-only on this address (e.g. 127.0.0.1:3000)
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::default(),
    };
    let api_key = config.resolve_api_key(args.api_key.clone())?.to_string();

    let transport = ReqwestTransport::new().context("Failed to create HTTP client")?;
    let client = MapsClient::new(transport, &config.maps, config.search.clone(), &api_key)?;
    let controller = Arc::new(SearchController::new(client));

    info!("Stacks library locator");

    if let Some(listen) = &args.listen {
        let listener = tokio::net::TcpListener::bind(listen)
            .await
            .with_context(|| format!("Failed to bind {}", listen))?;
        info!("Serving map model on {}", listen);
        tokio::spawn(server::serve(listener, controller.subscribe()));
    }

    let renderer = tokio::spawn(view::render_changes(controller.subscribe(), std::io::stdout()));

    let mut tasks = JoinSet::new();
    {
        let controller = controller.clone();
        let device = StaticLocator::from_args(args.lat, args.lon);
        let region = config.region.clone();
        tasks.spawn(async move {
            controller.bootstrap(&device, &region).await;
        });
    }

    println!("Enter a postal code (e.g. 530000), Ctrl-D to quit.");

    let input = BufReader::new(tokio::io::stdin());
    session::run(controller, tasks, input, renderer).await?;

    Ok(())
}
