use std::fs;
use std::path::Path;

use alphachrone_core::IsochroneConfig;
use tracing::debug;

use crate::cli::NetworkArgs;

/// Pipeline settings from the optional TOML file, with command-line
/// overrides applied on top.
pub fn load_config(args: &NetworkArgs) -> Result<IsochroneConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => IsochroneConfig::default(),
    };

    if args.parallel {
        config.parallel_schedule = true;
    }
    if args.timeout_ms.is_some() {
        config.timeout_ms = args.timeout_ms;
    }

    config.validate()?;
    debug!(?config, "pipeline configuration");
    Ok(config)
}

fn read_config(path: &Path) -> Result<IsochroneConfig, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config '{}': {e}", path.display()))?;
    parse_config(&text).map_err(|e| format!("Invalid config '{}': {e}", path.display()).into())
}

fn parse_config(text: &str) -> Result<IsochroneConfig, toml::de::Error> {
    toml::from_str(text)
}
