//! Thermwatch CLI: offline inspection of event payloads.
//!
//! Usage:
//!   thermwatch summary <EVENT_JSON>     Show counts, preview, time span, air quality
//!   thermwatch overlay <EVENT_JSON>     Map one image's detections onto a viewport
//!   thermwatch stats <EVENTS_JSON>      Dashboard statistics for an event list
//!   thermwatch validate <EVENT_JSON>    Report data-quality problems

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thermwatch_common::config::{config_file_path, AppConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "thermwatch",
    about = "Inspect thermal-camera smoker detection events",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the standard location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a single event
    Summary {
        /// Path to an event JSON file
        path: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Map an image's detections into a viewport
    Overlay {
        /// Path to an event JSON file
        path: PathBuf,

        /// Image id within the event
        #[arg(long)]
        image: i64,

        /// Viewport width in pixels
        #[arg(long)]
        viewport_width: f64,

        /// Viewport height in pixels
        #[arg(long)]
        viewport_height: f64,

        /// Decoded image width, when the payload lacks an intrinsic size
        #[arg(long, requires = "image_height")]
        image_width: Option<f64>,

        /// Decoded image height, when the payload lacks an intrinsic size
        #[arg(long, requires = "image_width")]
        image_height: Option<f64>,
    },

    /// Dashboard statistics for a list of events
    Stats {
        /// Path to a JSON array of events
        path: PathBuf,

        /// Only pending events
        #[arg(long, conflicts_with = "handled_by")]
        pending: bool,

        /// Only events handled by this user id
        #[arg(long)]
        handled_by: Option<i64>,

        /// Only events on this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },

    /// Check an event payload for data-quality problems
    Validate {
        /// Path to an event JSON file
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // An explicit --config must load; the standard location falls back to
    // defaults, reported once a subscriber is installed.
    let (mut config, load_error) = match &cli.config {
        Some(path) => {
            let config = AppConfig::load_from(path)
                .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?;
            (config, None)
        }
        None => match AppConfig::load() {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        },
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    thermwatch_common::logging::init_logging(&config.logging);

    if let Some(e) = load_error {
        tracing::warn!(
            "Failed to load config at {}: {e}; using defaults",
            config_file_path().display()
        );
    }

    match cli.command {
        Commands::Summary { path, json } => commands::summary::run(path, json, &config),
        Commands::Overlay {
            path,
            image,
            viewport_width,
            viewport_height,
            image_width,
            image_height,
        } => commands::overlay::run(
            path,
            image,
            viewport_width,
            viewport_height,
            image_width.zip(image_height),
            &config,
        ),
        Commands::Stats {
            path,
            pending,
            handled_by,
            date,
        } => commands::stats::run(path, pending, handled_by, date),
        Commands::Validate { path } => commands::validate::run(path),
    }
}
