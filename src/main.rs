mod cli;
mod config;
mod render;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use alphachrone_core::loading::{NetworkGraphProvider, StreetNetwork};
use alphachrone_core::{
    DEFAULT_SPEED_KMH, IsochroneOutput, IsochroneRequest, OutputFormat, RouteMode,
    build_isochrone, bulk_isochrones,
};
use clap::Parser;
use geo::Point;
use serde::Deserialize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{BatchArgs, Cli, Command, IsochroneArgs, NetworkArgs};
use crate::config::load_config;

type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let result = match cli.command {
        Command::Isochrone(args) => run_isochrone(&args),
        Command::Batch(args) => run_batch(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    // Logs go to stderr so stdout carries only the result
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_provider(args: &NetworkArgs) -> AppResult<NetworkGraphProvider> {
    let network = StreetNetwork::from_path(&args.network)?;
    if network.is_empty() {
        warn!("Street network {} has no nodes", args.network.display());
    }
    Ok(NetworkGraphProvider::new(network)?)
}

fn run_isochrone(args: &IsochroneArgs) -> AppResult<()> {
    let config = load_config(&args.common)?;
    let provider = load_provider(&args.common)?;

    let request = IsochroneRequest::new(Point::new(args.lon, args.lat), args.minutes)
        .with_speed(args.speed)
        .with_mode(args.mode.into())
        .with_output(OutputFormat::Native);

    let IsochroneOutput::Native(isochrone) = build_isochrone(&provider, &request, &config)? else {
        return Err("pipeline returned an interchange geometry for a native request".into());
    };
    info!(
        alpha = ?isochrone.alpha(),
        reached = isochrone.reached_nodes(),
        "isochrone computed"
    );
    if isochrone.is_degenerate() {
        warn!("Reached street nodes span no area, the polygon is degenerate");
    }

    write_output(args.common.output.as_deref(), &render::render(&isochrone, args.format)?)
}

/// Entry of a batch request file
#[derive(Debug, Deserialize)]
struct BatchEntry {
    lon: f64,
    lat: f64,
    minutes: f64,
    #[serde(default = "default_speed")]
    speed_kmh: f64,
    #[serde(default)]
    mode: RouteMode,
}

fn default_speed() -> f64 {
    DEFAULT_SPEED_KMH
}

fn run_batch(args: &BatchArgs) -> AppResult<()> {
    let config = load_config(&args.common)?;
    let provider = load_provider(&args.common)?;

    let text = fs::read_to_string(&args.requests)
        .map_err(|e| format!("Failed to read '{}': {e}", args.requests.display()))?;
    let entries: Vec<BatchEntry> = serde_json::from_str(&text)?;
    let requests: Vec<IsochroneRequest> = entries
        .iter()
        .map(|entry| {
            IsochroneRequest::new(Point::new(entry.lon, entry.lat), entry.minutes)
                .with_speed(entry.speed_kmh)
                .with_mode(entry.mode)
                .with_output(OutputFormat::Native)
        })
        .collect();
    info!(count = requests.len(), "computing batch");

    let results: Vec<_> = bulk_isochrones(&provider, &requests, &config)
        .into_iter()
        .enumerate()
        .map(|(position, result)| match result {
            Ok(IsochroneOutput::Native(isochrone)) => Ok(isochrone),
            Ok(IsochroneOutput::Interchange(_)) => Err(alphachrone_core::Error::InvalidData(
                format!("request {position} returned an interchange geometry"),
            )),
            Err(e) => {
                warn!(position, "request failed: {e}");
                Err(e)
            }
        })
        .collect();

    write_output(args.common.output.as_deref(), &render::render_batch(&results)?)
}

fn write_output(path: Option<&Path>, text: &str) -> AppResult<()> {
    match path {
        Some(path) => {
            fs::write(path, text)
                .map_err(|e| format!("Failed to write '{}': {e}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
