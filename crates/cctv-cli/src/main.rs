//! JOLUP CCTV - simulated surveillance dashboard
//!
//! # Quick Start
//!
//! ```bash
//! # Full-screen dashboard (q / Esc / Ctrl-C to quit)
//! cctv
//!
//! # Custom camera table, deterministic glitches, logs to a file
//! cctv --config cameras.toml --seed 42 --log-file cctv.log run
//!
//! # Print the camera table, or one rendered frame
//! cctv list
//! cctv snapshot --width 160 --height 48
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use cctv_clock::SystemClock;
use cctv_tui::{render_snapshot, run_dashboard, DashboardOptions};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod display;

use crate::config::AppConfig;

/// JOLUP CCTV - simulated surveillance camera dashboard
#[derive(Parser)]
#[command(name = "cctv")]
#[command(author = "JOLUP CCTV Contributors")]
#[command(version)]
#[command(about = "Simulated surveillance camera dashboard for the terminal", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// TOML file with the camera table and status values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for glitch timing and cosmetic noise (overrides the config file)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Append logs to this file while the dashboard owns the terminal
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the live dashboard (default)
    Run,

    /// Print the camera table and active feed ratio
    List {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a single frame to stdout
    Snapshot {
        /// Frame width in cells
        #[arg(long, default_value_t = 150)]
        width: u16,

        /// Frame height in cells
        #[arg(long, default_value_t = 48)]
        height: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run);

    init_logging(cli.log_file.as_deref(), matches!(command, Commands::Run))?;

    let config = AppConfig::load(cli.config.as_deref())?;
    let seed = cli.seed.or(config.seed);
    let settings = config.into_settings()?;
    tracing::info!(
        cameras = settings.cameras.len(),
        seeded = seed.is_some(),
        "configuration loaded"
    );

    let options = DashboardOptions {
        seed,
        ..DashboardOptions::default()
    };

    match command {
        Commands::Run => run_dashboard(settings, options)
            .await
            .context("dashboard terminated with an error")?,
        Commands::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(settings.cameras.records())?);
            } else {
                display::print_cameras(&settings.cameras);
            }
        }
        Commands::Snapshot { width, height } => {
            let frame =
                render_snapshot(settings, Arc::new(SystemClock), options, width, height).await?;
            println!("{}", frame);
        }
    }

    Ok(())
}

/// Install the tracing subscriber.
///
/// The live dashboard owns stdout and stderr, so without a log file it runs
/// with no subscriber at all.
fn init_logging(log_file: Option<&Path>, owns_terminal: bool) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
                .init();
        }
        None if owns_terminal => {}
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
