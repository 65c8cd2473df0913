mod render;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use skycast_core::{AppError, Config};
use skycast_weather::{Coordinate, UnitPolicy, WeatherAggregator};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "skycast", version, about = "Composite weather snapshots for a coordinate")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch current conditions, forecasts, air quality and alerts
    Weather {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// metric or imperial; defaults to the configured policy
        #[arg(short, long)]
        units: Option<UnitPolicy>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Search places by name prefix
    Places {
        /// At least three characters
        query: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "skycast failed");
            eprintln!("Error: {e}");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    skycast_core::init()?;

    let (config, _) = Config::load_validated(cli.config.as_deref())?;
    let aggregator = WeatherAggregator::from_config(&config)?;

    match cli.command {
        Commands::Weather {
            lat,
            lon,
            units,
            format,
        } => {
            let units = units.unwrap_or(config.weather.units);
            let at = Coordinate::new(lat, lon);
            tracing::info!(%at, %units, "Fetching weather snapshot");

            let snapshot = aggregator.snapshot(at, units).await;
            match format {
                Format::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&snapshot).context("Failed to encode snapshot")?
                ),
                Format::Text => print!("{}", render::snapshot_text(&snapshot, units)),
            }
        }
        Commands::Places { query, format } => {
            let places = aggregator.provider().search_places(&query).await?;
            match format {
                Format::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&places).context("Failed to encode places")?
                ),
                Format::Text => print!("{}", render::places_text(&places)),
            }
        }
    }

    Ok(())
}
