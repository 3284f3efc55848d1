//! layerlist - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// layerlist - browse image layers and pick a comparison point
#[derive(Parser, Debug)]
#[command(name = "layerlist")]
#[command(version)]
#[command(about = "TUI list of image layers with single and cumulative comparison modes")]
pub struct Args {
    /// File with one layer per line (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of the configured one
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Start comparing all layers up to the selection
    #[arg(long)]
    pub all_layers: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = layerlist::config::load_config_with_precedence(args.config.clone())?;
        let merged = layerlist::config::merge_config(config_file);
        let with_env = layerlist::config::apply_env_overrides(merged);
        layerlist::config::apply_cli_overrides(with_env, args.log_file.clone())
    };

    layerlist::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let input_source = layerlist::source::detect_input_source(args.file.clone())?;
    let layers = input_source.read_layers()?;

    let options = layerlist::view::AppOptions {
        all_layers: args.all_layers,
        color_config: layerlist::view::ColorConfig::from_env_and_args(args.no_color),
        key_bindings: config.key_bindings,
    };

    layerlist::view::run_with_layers(layers, &options)?;

    Ok(())
}
