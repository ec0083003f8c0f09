use std::path::PathBuf;

use alphachrone_core::RouteMode;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "alphachrone")]
#[command(about = "Travel-time isochrones over a street network", version)]
pub struct Cli {
    /// Log filter, e.g. `info` or `alphachrone_core=debug`; overrides RUST_LOG
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Isochrone around a single origin
    Isochrone(IsochroneArgs),
    /// Isochrones for every origin listed in a JSON file
    Batch(BatchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct NetworkArgs {
    /// Street network, JSON (`nodes` / `edges`) or `.geojson` FeatureCollection
    #[arg(long)]
    pub network: PathBuf,

    /// TOML file with pipeline settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Evaluate alpha candidates in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Write the result here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct IsochroneArgs {
    #[command(flatten)]
    pub common: NetworkArgs,

    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Travel-time budget in minutes
    #[arg(long)]
    pub minutes: f64,

    /// Travel speed in km/h
    #[arg(long, default_value_t = alphachrone_core::DEFAULT_SPEED_KMH)]
    pub speed: f64,

    #[arg(long, value_enum, default_value_t = ModeArg::Walk)]
    pub mode: ModeArg,

    #[arg(long, value_enum, default_value_t = FormatArg::Geojson)]
    pub format: FormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub common: NetworkArgs,

    /// JSON array of `{ "lon", "lat", "minutes", "speed_kmh"?, "mode"? }`
    #[arg(long)]
    pub requests: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Walk,
    Bike,
    Drive,
}

impl From<ModeArg> for RouteMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Walk => RouteMode::Walk,
            ModeArg::Bike => RouteMode::Bike,
            ModeArg::Drive => RouteMode::Drive,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// `GeoJSON` Polygon geometry
    Geojson,
    /// `GeoJSON` Feature with alpha and reach metadata
    Feature,
    Wkt,
}
