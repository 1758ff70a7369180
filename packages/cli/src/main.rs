#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the report hotspot and heatmap tools.

use std::collections::BTreeSet;
use std::path::PathBuf;

use buurtkompas_cli::config::load_config;
use buurtkompas_cli::export::{hotspots_to_geojson, overlays_to_geojson, to_json};
use buurtkompas_cli::input::load_reports;
use buurtkompas_cli::{OutputFormat, run_heatmap, run_hotspots};
use buurtkompas_heatmap::{OverlayStyle, legend_stops};
use buurtkompas_report_models::ReportFilter;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "buurtkompas", about = "Report hotspot and heatmap tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the commands that read reports.
#[derive(Args)]
struct InputArgs {
    /// JSON array of report documents (`-` for stdin)
    #[arg(long)]
    input: PathBuf,
    /// TOML config with `[hotspots]` and `[heatmap]` tables
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output encoding: `json` or `geojson`
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Only include this category (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,
    /// Only include this status (repeatable)
    #[arg(long = "status")]
    statuses: Vec<String>,
    /// Only include reports filed by `--user-id`
    #[arg(long)]
    only_mine: bool,
    /// The signed-in user
    #[arg(long)]
    user_id: Option<String>,
    /// Only include reports from this municipality (e.g., "`s-hertogenbosch`")
    #[arg(long)]
    municipality: Option<String>,
}

impl InputArgs {
    fn filter(&self) -> ReportFilter {
        ReportFilter {
            categories: self.categories.iter().cloned().collect::<BTreeSet<_>>(),
            statuses: self.statuses.iter().cloned().collect::<BTreeSet<_>>(),
            only_mine: self.only_mine,
            current_user_id: self.user_id.clone(),
            municipality_id: self.municipality.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the busiest grid cells
    Hotspots {
        #[command(flatten)]
        input: InputArgs,
        /// Grid cell size in degrees (overrides config)
        #[arg(long)]
        cell_size: Option<f64>,
        /// Number of hotspots to return (overrides config)
        #[arg(long)]
        top_n: Option<usize>,
    },
    /// Compute density overlays for every located report
    Heatmap {
        #[command(flatten)]
        input: InputArgs,
        /// Current map zoom as map points per screen point
        #[arg(long)]
        zoom_scale: f64,
        /// Neighborhood radius in meters (overrides config)
        #[arg(long)]
        neighborhood_meters: Option<f64>,
        /// Circle radius at the reference zoom (overrides config)
        #[arg(long)]
        base_radius_meters: Option<f64>,
    },
    /// Print the heat color ramp
    Legend,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Hotspots {
            input,
            cell_size,
            top_n,
        } => {
            let mut config = load_config(input.config.as_deref())?;
            if let Some(cell_size) = cell_size {
                config.hotspots.cell_size_degrees = cell_size;
            }
            if let Some(top_n) = top_n {
                config.hotspots.top_n = top_n;
            }

            let reports = load_reports(&input.input)?;
            let hotspots = run_hotspots(&reports, &input.filter(), &config)?;
            log::info!("Found {} hotspots", hotspots.len());

            let output = match input.format {
                OutputFormat::Json => to_json(&hotspots)?,
                OutputFormat::Geojson => to_json(&hotspots_to_geojson(&hotspots))?,
            };
            println!("{output}");
        }
        Commands::Heatmap {
            input,
            zoom_scale,
            neighborhood_meters,
            base_radius_meters,
        } => {
            let mut config = load_config(input.config.as_deref())?;
            if let Some(meters) = neighborhood_meters {
                config.heatmap.neighborhood_meters = meters;
            }
            if let Some(meters) = base_radius_meters {
                config.heatmap.base_radius_meters = meters;
            }

            let reports = load_reports(&input.input)?;
            let overlays = run_heatmap(&reports, &input.filter(), &config, zoom_scale)?;
            log::info!("Computed {} overlays", overlays.len());

            let output = match input.format {
                OutputFormat::Json => to_json(&overlays)?,
                OutputFormat::Geojson => {
                    to_json(&overlays_to_geojson(&overlays, &OverlayStyle::default()))?
                }
            };
            println!("{output}");
        }
        Commands::Legend => {
            println!("{:<10} {:<8} LABEL", "POSITION", "COLOR");
            println!("{}", "-".repeat(30));
            let stops = legend_stops();
            let last = stops.len().saturating_sub(1);
            for (i, stop) in stops.iter().enumerate() {
                let label = match i {
                    0 => "Laag",
                    i if i == last => "Hoog",
                    _ => "",
                };
                println!("{:<10.2} {:<8} {label}", stop.position, stop.color.to_hex());
            }
        }
    }

    Ok(())
}
