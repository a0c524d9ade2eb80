//! VolSlice desktop viewer.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use volslice::{run_volslice, VolSliceConfig};

/// Interactive option-surface viewer with linked slice charts
#[derive(Parser, Debug)]
#[command(name = "volslice")]
#[command(about = "3D surface with synchronized strike and expiry slices")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "VOLSLICE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write the default configuration to this path and exit
    #[arg(long)]
    write_default_config: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt().with_env_filter(filter).with_target(true).init();

    if let Some(path) = &args.write_default_config {
        return write_default_config(path);
    }

    let cfg = match &args.config {
        Some(path) => match VolSliceConfig::load_from_path(path) {
            Ok(cfg) => {
                info!(path = %path.display(), "loaded configuration");
                cfg
            }
            Err(e) => {
                error!("{e}; using defaults");
                VolSliceConfig::default()
            }
        },
        None => VolSliceConfig::default(),
    };

    info!("starting VolSlice");
    run_volslice(cfg)
}

/// Save the default configuration to `path`; a failed write is an error exit.
fn write_default_config(path: &Path) -> eframe::Result<()> {
    VolSliceConfig::default().save_to_path(path).map_err(|e| {
        error!("{e}");
        eframe::Error::AppCreation(Box::new(e))
    })?;
    info!(path = %path.display(), "wrote default configuration");
    Ok(())
}
