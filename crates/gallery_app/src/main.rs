mod platform;

use std::path::PathBuf;

use clap::Parser;
use platform::config::GalleryConfig;
use platform::logging::{self, LogDestination};

/// Infinite-scroll photo gallery for the terminal.
#[derive(Debug, Parser)]
#[command(name = "gallery", version)]
struct Args {
    /// Manifest URL. Overrides `manifest_url` from the config file.
    manifest: Option<String>,
    /// RON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Shuffle the gallery right after it loads.
    #[arg(long)]
    shuffle: bool,
    /// Query appended to every image request, e.g. `format=jpg&name=small`.
    #[arg(long)]
    image_query: Option<String>,
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::initialize(args.log);

    let mut config = match &args.config {
        Some(path) => GalleryConfig::load(path)?,
        None => GalleryConfig::default(),
    };
    if let Some(manifest) = args.manifest {
        config.manifest_url = Some(manifest);
    }
    if let Some(query) = args.image_query {
        config.image_query = Some(query);
    }

    platform::app::run_app(config, args.shuffle)
}
